//! Canvas expansion
//!
//! A 9-patch needs one spare pixel on every side for its border ring.

use crate::error::{RenderError, RenderResult};
use crate::image::Image;
use ninepatch_core::{Raster, color};

/// Copy of `raster` with a transparent 1-pixel ring around it.
///
/// The result is `(w + 2) x (h + 2)` with the original pixels at (1, 1).
/// Resolution and input format are carried over.
pub fn expand(raster: &Raster) -> RenderResult<Raster> {
    Ok(raster.add_border(1, color::TRANSPARENT)?)
}

/// Grow the canvas of `image` by one pixel on every side.
///
/// Every layer moves by (1, 1), so the artwork sits inside the new ring
/// exactly where [`expand`] would put it.
pub fn expand_canvas(image: &mut Image) -> RenderResult<()> {
    image.resize_canvas(image.width() + 2, image.height() + 2, 1, 1)
}

/// Undo an in-place render: drop the border layer and shrink the canvas
/// back to the artwork size.
///
/// Returns `false` if the image had no border layer.
pub fn strip_border(image: &mut Image) -> RenderResult<bool> {
    let Some(id) = image.border_layer().map(|l| l.id()) else {
        return Ok(false);
    };
    if image.width() < 3 || image.height() < 3 {
        return Err(RenderError::Geometry {
            what: "bordered canvas",
            expected: 3,
            actual: image.width().min(image.height()),
        });
    }
    image.remove_layer(id);
    image.resize_canvas(image.width() - 2, image.height() - 2, -1, -1)?;
    Ok(true)
}
