//! Per-line activity along one axis of a mask

use std::ops::Range;

/// Axis along which lines are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// One entry per row (y)
    Rows,
    /// One entry per column (x)
    Columns,
}

/// Which lines of one axis contain non-transparent pixels
///
/// The length always equals the extent of the raster (or canvas) along
/// [`axis`](Self::axis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineActivitySet {
    axis: Axis,
    lines: Vec<bool>,
}

impl LineActivitySet {
    /// All-inactive set of `len` lines
    pub fn new(axis: Axis, len: u32) -> Self {
        Self {
            axis,
            lines: vec![false; len as usize],
        }
    }

    pub fn from_lines(axis: Axis, lines: Vec<bool>) -> Self {
        Self { axis, lines }
    }

    /// Set with the lines in `active` switched on.
    ///
    /// Ranges are clipped to `len`.
    pub fn from_runs(axis: Axis, len: u32, active: &[Range<u32>]) -> Self {
        let mut set = Self::new(axis, len);
        for run in active {
            for i in run.start..run.end.min(len) {
                set.lines[i as usize] = true;
            }
        }
        set
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether line `i` is active; out-of-range lines are inactive.
    pub fn is_active(&self, i: u32) -> bool {
        self.lines.get(i as usize).copied().unwrap_or(false)
    }

    pub fn set(&mut self, i: u32, active: bool) {
        if let Some(line) = self.lines.get_mut(i as usize) {
            *line = active;
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.lines
    }

    /// Number of active lines
    pub fn count(&self) -> u32 {
        self.lines.iter().filter(|&&a| a).count() as u32
    }

    /// Maximal runs of consecutive active lines, in order
    pub fn runs(&self) -> Vec<Range<u32>> {
        let mut runs = Vec::new();
        let mut start = None;
        for (i, &active) in self.lines.iter().enumerate() {
            match (active, start) {
                (true, None) => start = Some(i as u32),
                (false, Some(s)) => {
                    runs.push(s..i as u32);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(s..self.len());
        }
        runs
    }

    /// Place this set at `offset` on a canvas axis of `extent` lines.
    ///
    /// Line `i` lands on canvas line `offset + i`. Lines that fall outside
    /// the canvas are dropped; canvas lines the set does not cover are
    /// inactive.
    pub fn project(&self, offset: i32, extent: u32) -> LineActivitySet {
        let mut out = LineActivitySet::new(self.axis, extent);
        for (i, &active) in self.lines.iter().enumerate() {
            let pos = offset as i64 + i as i64;
            if active && (0..extent as i64).contains(&pos) {
                out.lines[pos as usize] = true;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs() {
        let set = LineActivitySet::from_lines(
            Axis::Rows,
            vec![false, true, true, false, true, false, false, true],
        );
        assert_eq!(set.runs(), vec![1..3, 4..5, 7..8]);
        assert_eq!(set.count(), 4);
        assert!(LineActivitySet::new(Axis::Rows, 5).runs().is_empty());
    }

    #[test]
    fn test_from_runs_clips() {
        let set = LineActivitySet::from_runs(Axis::Columns, 6, &[1..3, 5..9]);
        assert_eq!(set.as_slice(), &[false, true, true, false, false, true]);
        assert_eq!(set.axis(), Axis::Columns);
    }

    #[test]
    fn test_project() {
        let set = LineActivitySet::from_runs(Axis::Rows, 4, &[0..4]);
        assert_eq!(set.project(2, 5).runs(), vec![2..5]);
        assert_eq!(set.project(-3, 5).runs(), vec![0..1]);
        assert_eq!(set.project(10, 5).count(), 0);
        assert_eq!(set.project(0, 8).len(), 8);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut set = LineActivitySet::new(Axis::Rows, 2);
        set.set(5, true);
        assert!(!set.is_active(5));
        set.set(1, true);
        assert!(set.is_active(1));
    }
}
