//! Mask analysis
//!
//! A [`MaskAnalyzer`] turns the alpha channel of a mask into a
//! [`LineActivitySet`] for one axis. Two strategies exist:
//!
//! - [`LineScan`]: a line is active iff at least one of its pixels has
//!   alpha > 0. Every separate region produces its own run.
//! - [`BoundingBox`]: every line inside the bounding box of the
//!   non-transparent pixels is active, so a mask produces at most one run.

use crate::activity::{Axis, LineActivitySet};
use crate::layer::MaskLayer;
use ninepatch_core::{Raster, color};

/// Derives line activity from a mask
pub trait MaskAnalyzer {
    /// Activity of every line of `mask` along `axis`, in mask coordinates.
    fn analyze(&self, mask: &MaskLayer, axis: Axis) -> LineActivitySet;
}

/// Per-line "any visible pixel" scan
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScan;

/// Single bounding box of the visible pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox;

/// Analyzer selection for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerStrategy {
    #[default]
    LineScan,
    BoundingBox,
}

impl AnalyzerStrategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "line-scan" | "linescan" | "scan" => Some(Self::LineScan),
            "bounding-box" | "boundingbox" | "bbox" => Some(Self::BoundingBox),
            _ => None,
        }
    }
}

fn line_scan(raster: &Raster, axis: Axis) -> LineActivitySet {
    match axis {
        Axis::Rows => LineActivitySet::from_lines(
            axis,
            (0..raster.height())
                .map(|y| raster.row_data(y).iter().any(|&p| color::alpha(p) > 0))
                .collect(),
        ),
        Axis::Columns => {
            let mut lines = vec![false; raster.width() as usize];
            for y in 0..raster.height() {
                for (line, &p) in lines.iter_mut().zip(raster.row_data(y)) {
                    *line |= color::alpha(p) > 0;
                }
            }
            LineActivitySet::from_lines(axis, lines)
        }
    }
}

impl MaskAnalyzer for LineScan {
    fn analyze(&self, mask: &MaskLayer, axis: Axis) -> LineActivitySet {
        line_scan(&mask.raster, axis)
    }
}

impl MaskAnalyzer for BoundingBox {
    fn analyze(&self, mask: &MaskLayer, axis: Axis) -> LineActivitySet {
        let scan = line_scan(&mask.raster, axis);
        let lines = scan.as_slice();
        let (Some(first), Some(last)) = (
            lines.iter().position(|&a| a),
            lines.iter().rposition(|&a| a),
        ) else {
            return scan;
        };
        LineActivitySet::from_runs(axis, scan.len(), &[first as u32..last as u32 + 1])
    }
}

impl MaskAnalyzer for AnalyzerStrategy {
    fn analyze(&self, mask: &MaskLayer, axis: Axis) -> LineActivitySet {
        match self {
            AnalyzerStrategy::LineScan => LineScan.analyze(mask, axis),
            AnalyzerStrategy::BoundingBox => BoundingBox.analyze(mask, axis),
        }
    }
}
