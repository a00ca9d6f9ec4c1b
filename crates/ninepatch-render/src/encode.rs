//! 9-patch border encoding
//!
//! The border is a 1-pixel ring around the artwork. With `W x H` artwork the
//! encoded raster is `(W + 2) x (H + 2)`:
//!
//! | Edge   | Pixels                | Meaning         |
//! |--------|-----------------------|-----------------|
//! | left   | `(0, y + 1)`          | stretch rows    |
//! | top    | `(x + 1, 0)`          | stretch columns |
//! | right  | `(W + 1, y + 1)`      | content rows    |
//! | bottom | `(x + 1, H + 1)`      | content columns |
//!
//! An active line is opaque black, everything else on the ring is fully
//! transparent. The four corners are always transparent.

use crate::activity::{Axis, LineActivitySet};
use crate::analyze::MaskAnalyzer;
use crate::error::{RenderError, RenderResult};
use crate::layer::MaskLayer;
use ninepatch_core::{Raster, RasterMut, color};

/// Activity of the four border edges for artwork of a given size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderSpec {
    left: LineActivitySet,
    top: LineActivitySet,
    right: LineActivitySet,
    bottom: LineActivitySet,
    width: u32,
    height: u32,
}

fn check_edge(
    set: &LineActivitySet,
    axis: Axis,
    extent: u32,
    what: &'static str,
) -> RenderResult<()> {
    if set.axis() != axis || set.len() != extent {
        return Err(RenderError::Geometry {
            what,
            expected: extent,
            actual: set.len(),
        });
    }
    Ok(())
}

impl BorderSpec {
    /// Build a spec for `width x height` artwork.
    ///
    /// `left` and `right` must be row sets of length `height`, `top` and
    /// `bottom` column sets of length `width`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Geometry`] if any set has the wrong axis or
    /// length.
    pub fn new(
        left: LineActivitySet,
        top: LineActivitySet,
        right: LineActivitySet,
        bottom: LineActivitySet,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        check_edge(&left, Axis::Rows, height, "left edge")?;
        check_edge(&top, Axis::Columns, width, "top edge")?;
        check_edge(&right, Axis::Rows, height, "right edge")?;
        check_edge(&bottom, Axis::Columns, width, "bottom edge")?;
        Ok(Self {
            left,
            top,
            right,
            bottom,
            width,
            height,
        })
    }

    /// Analyze both masks and project them onto a `width x height` canvas.
    pub fn from_masks(
        analyzer: &dyn MaskAnalyzer,
        stretch: &MaskLayer,
        content: &MaskLayer,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        let project = |mask: &MaskLayer, axis: Axis| {
            let (offset, extent) = match axis {
                Axis::Rows => (mask.offset.top, height),
                Axis::Columns => (mask.offset.left, width),
            };
            analyzer.analyze(mask, axis).project(offset, extent)
        };
        Self::new(
            project(stretch, Axis::Rows),
            project(stretch, Axis::Columns),
            project(content, Axis::Rows),
            project(content, Axis::Columns),
            width,
            height,
        )
    }

    /// Stretch rows
    pub fn left(&self) -> &LineActivitySet {
        &self.left
    }

    /// Stretch columns
    pub fn top(&self) -> &LineActivitySet {
        &self.top
    }

    /// Content rows
    pub fn right(&self) -> &LineActivitySet {
        &self.right
    }

    /// Content columns
    pub fn bottom(&self) -> &LineActivitySet {
        &self.bottom
    }

    /// Artwork width without the border
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Artwork height without the border
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn expanded_width(&self) -> u32 {
        self.width + 2
    }

    pub fn expanded_height(&self) -> u32 {
        self.height + 2
    }
}

fn ring_pixel(active: bool) -> u32 {
    if active {
        color::OPAQUE_BLACK
    } else {
        color::TRANSPARENT
    }
}

/// Write the border ring of `spec` into an expanded canvas.
///
/// Every ring pixel is overwritten; interior pixels are left alone.
///
/// # Errors
///
/// Returns [`RenderError::Geometry`] if the canvas is not exactly
/// `(width + 2) x (height + 2)`.
pub fn encode(spec: &BorderSpec, canvas: &mut RasterMut) -> RenderResult<()> {
    if canvas.width() != spec.expanded_width() {
        return Err(RenderError::Geometry {
            what: "canvas width",
            expected: spec.expanded_width(),
            actual: canvas.width(),
        });
    }
    if canvas.height() != spec.expanded_height() {
        return Err(RenderError::Geometry {
            what: "canvas height",
            expected: spec.expanded_height(),
            actual: canvas.height(),
        });
    }

    let (w, h) = (spec.width, spec.height);
    for x in 0..w + 2 {
        // x == 0 and x == w + 1 are the corners
        let column = x.checked_sub(1).filter(|&c| c < w);
        let top = column.is_some_and(|c| spec.top.is_active(c));
        let bottom = column.is_some_and(|c| spec.bottom.is_active(c));
        canvas.set_pixel_unchecked(x, 0, ring_pixel(top));
        canvas.set_pixel_unchecked(x, h + 1, ring_pixel(bottom));
    }
    for y in 0..h {
        canvas.set_pixel_unchecked(0, y + 1, ring_pixel(spec.left.is_active(y)));
        canvas.set_pixel_unchecked(w + 1, y + 1, ring_pixel(spec.right.is_active(y)));
    }
    Ok(())
}

/// Read the border ring of an encoded 9-patch raster.
///
/// A ring pixel is active iff it is exactly opaque black.
///
/// # Errors
///
/// Returns [`RenderError::Geometry`] if the raster has no interior, i.e. it
/// is narrower or shorter than 3 pixels.
pub fn decode(raster: &Raster) -> RenderResult<BorderSpec> {
    for (what, extent) in [
        ("9-patch width", raster.width()),
        ("9-patch height", raster.height()),
    ] {
        if extent < 3 {
            return Err(RenderError::Geometry {
                what,
                expected: 3,
                actual: extent,
            });
        }
    }
    let (w, h) = (raster.width() - 2, raster.height() - 2);
    let black = |x: u32, y: u32| raster.get_pixel_unchecked(x, y) == color::OPAQUE_BLACK;

    BorderSpec::new(
        LineActivitySet::from_lines(Axis::Rows, (0..h).map(|y| black(0, y + 1)).collect()),
        LineActivitySet::from_lines(Axis::Columns, (0..w).map(|x| black(x + 1, 0)).collect()),
        LineActivitySet::from_lines(Axis::Rows, (0..h).map(|y| black(w + 1, y + 1)).collect()),
        LineActivitySet::from_lines(Axis::Columns, (0..w).map(|x| black(x + 1, h + 1)).collect()),
        w,
        h,
    )
}

/// Check that every ring pixel is opaque black or fully transparent and
/// that the corners are transparent.
pub fn is_well_formed(raster: &Raster) -> bool {
    let (w, h) = (raster.width(), raster.height());
    if w < 3 || h < 3 {
        return false;
    }
    let ok = |x: u32, y: u32| {
        let p = raster.get_pixel_unchecked(x, y);
        p == color::OPAQUE_BLACK || p == color::TRANSPARENT
    };
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
    corners
        .iter()
        .all(|&(x, y)| raster.get_pixel_unchecked(x, y) == color::TRANSPARENT)
        && (0..w).all(|x| ok(x, 0) && ok(x, h - 1))
        && (0..h).all(|y| ok(0, y) && ok(w - 1, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(len: u32, active: &[std::ops::Range<u32>]) -> LineActivitySet {
        LineActivitySet::from_runs(Axis::Rows, len, active)
    }

    fn cols(len: u32, active: &[std::ops::Range<u32>]) -> LineActivitySet {
        LineActivitySet::from_runs(Axis::Columns, len, active)
    }

    #[test]
    fn test_new_validates_lengths() {
        assert!(BorderSpec::new(rows(4, &[]), cols(3, &[]), rows(4, &[]), cols(3, &[]), 3, 4).is_ok());
        let err = BorderSpec::new(rows(5, &[]), cols(3, &[]), rows(4, &[]), cols(3, &[]), 3, 4);
        assert!(matches!(
            err,
            Err(RenderError::Geometry { expected: 4, actual: 5, .. })
        ));
        // top given as rows
        assert!(BorderSpec::new(rows(4, &[]), rows(3, &[]), rows(4, &[]), cols(3, &[]), 3, 4).is_err());
    }

    #[test]
    fn test_encode_edges_and_corners() {
        let all_rows = rows(4, &[0..4]);
        let all_cols = cols(3, &[0..3]);
        let spec = BorderSpec::new(all_rows.clone(), all_cols.clone(), all_rows, all_cols, 3, 4).unwrap();
        let mut canvas = RasterMut::new(5, 6).unwrap();
        encode(&spec, &mut canvas).unwrap();
        let raster: Raster = canvas.into();

        for (x, y) in [(0, 0), (4, 0), (0, 5), (4, 5)] {
            assert_eq!(raster.get_pixel(x, y), Some(color::TRANSPARENT));
        }
        for y in 1..5 {
            assert_eq!(raster.get_pixel(0, y), Some(color::OPAQUE_BLACK));
            assert_eq!(raster.get_pixel(4, y), Some(color::OPAQUE_BLACK));
        }
        assert!(is_well_formed(&raster));
    }

    #[test]
    fn test_encode_resets_ring_and_keeps_interior() {
        let spec = BorderSpec::new(rows(2, &[1..2]), cols(2, &[]), rows(2, &[]), cols(2, &[]), 2, 2).unwrap();
        let mut canvas = RasterMut::new(4, 4).unwrap();
        canvas.fill(0x1122_33ff);
        encode(&spec, &mut canvas).unwrap();

        assert_eq!(canvas.get_pixel(0, 1), Some(color::TRANSPARENT));
        assert_eq!(canvas.get_pixel(0, 2), Some(color::OPAQUE_BLACK));
        assert_eq!(canvas.get_pixel(3, 3), Some(color::TRANSPARENT));
        assert_eq!(canvas.get_pixel(1, 1), Some(0x1122_33ff));
        assert_eq!(canvas.get_pixel(2, 2), Some(0x1122_33ff));
    }

    #[test]
    fn test_encode_rejects_wrong_canvas() {
        let spec = BorderSpec::new(rows(2, &[]), cols(2, &[]), rows(2, &[]), cols(2, &[]), 2, 2).unwrap();
        let mut canvas = RasterMut::new(4, 5).unwrap();
        assert!(matches!(
            encode(&spec, &mut canvas),
            Err(RenderError::Geometry { what: "canvas height", .. })
        ));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let spec = BorderSpec::new(
            rows(5, &[1..3]),
            cols(4, &[0..1, 3..4]),
            rows(5, &[0..5]),
            cols(4, &[2..3]),
            4,
            5,
        )
        .unwrap();
        let mut canvas = RasterMut::new(6, 7).unwrap();
        encode(&spec, &mut canvas).unwrap();
        assert_eq!(decode(&canvas.into()).unwrap(), spec);
    }

    #[test]
    fn test_decode_too_small() {
        assert!(decode(&Raster::new(2, 5).unwrap()).is_err());
        assert!(!is_well_formed(&Raster::new(5, 2).unwrap()));
    }

    #[test]
    fn test_malformed_ring() {
        let mut m = RasterMut::new(4, 4).unwrap();
        m.set_pixel(0, 0, color::OPAQUE_BLACK).unwrap();
        assert!(!is_well_formed(&m.into()));

        let mut m = RasterMut::new(4, 4).unwrap();
        m.set_pixel(0, 2, 0x0000_0080).unwrap();
        assert!(!is_well_formed(&m.into()));
    }
}
