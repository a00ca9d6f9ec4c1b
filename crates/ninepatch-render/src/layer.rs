//! Layers of the working document
//!
//! A layer is a raster placed on the canvas at an integer offset. Layers are
//! addressed by [`LayerId`] handles that stay valid across copies of the
//! image, never by their position in the stack.

use ninepatch_core::Raster;
use std::fmt;

/// Handle to a layer, unique within one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub(crate) u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the two 9-patch masks a mask layer is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskRole {
    /// Marks the stretchable rows and columns (left and top edges)
    Stretch,
    /// Marks the content area (right and bottom edges)
    Content,
}

impl MaskRole {
    /// Layer name given to a mask of this role by `prepare`
    pub fn layer_name(self) -> &'static str {
        match self {
            MaskRole::Stretch => "9-patch stretch",
            MaskRole::Content => "9-patch content",
        }
    }
}

/// Kind of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Ordinary image content
    Artwork,
    /// One of the two 9-patch masks
    Mask(MaskRole),
    /// The 1-pixel border ring added by rendering
    Border,
}

/// Position of a layer's top-left corner on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub left: i32,
    pub top: i32,
}

impl Offset {
    pub const ORIGIN: Offset = Offset { left: 0, top: 0 };

    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Offset moved by `(dx, dy)`
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
        }
    }

    /// Offset multiplied by a scale factor, rounded to the nearest pixel
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            left: (self.left as f64 * factor).round() as i32,
            top: (self.top as f64 * factor).round() as i32,
        }
    }
}

/// A layer of an [`Image`](crate::Image)
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) id: LayerId,
    pub(crate) name: String,
    pub(crate) kind: LayerKind,
    pub(crate) offset: Offset,
    pub(crate) visible: bool,
    pub(crate) raster: Raster,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Role of the layer if it is a 9-patch mask
    pub fn mask_role(&self) -> Option<MaskRole> {
        match self.kind {
            LayerKind::Mask(role) => Some(role),
            _ => None,
        }
    }

    /// Read-only mask view of this layer
    pub fn as_mask(&self) -> MaskLayer {
        MaskLayer {
            raster: self.raster.clone(),
            offset: self.offset,
        }
    }
}

/// A mask raster together with its position on the canvas
///
/// This is what the analyzers consume. Cloning shares the pixel data.
#[derive(Debug, Clone)]
pub struct MaskLayer {
    pub raster: Raster,
    pub offset: Offset,
}

impl MaskLayer {
    pub fn new(raster: Raster, offset: Offset) -> Self {
        Self { raster, offset }
    }

    /// Mask covering the canvas from the origin
    pub fn at_origin(raster: Raster) -> Self {
        Self::new(raster, Offset::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_scaled_rounds() {
        assert_eq!(Offset::new(3, -3).scaled(1.5), Offset::new(5, -5));
        assert_eq!(Offset::new(4, 1).scaled(0.5), Offset::new(2, 1));
        assert_eq!(Offset::ORIGIN.shifted(1, 1), Offset::new(1, 1));
    }

    #[test]
    fn test_mask_view_shares_pixels() {
        let layer = Layer {
            id: LayerId(7),
            name: "m".to_string(),
            kind: LayerKind::Mask(MaskRole::Content),
            offset: Offset::new(2, 3),
            visible: true,
            raster: Raster::new(4, 4).unwrap(),
        };
        let mask = layer.as_mask();
        assert_eq!(mask.offset, Offset::new(2, 3));
        assert_eq!(layer.raster().ref_count(), 2);
        assert_eq!(layer.mask_role(), Some(MaskRole::Content));
        assert_eq!(layer.id().to_string(), "#7");
    }
}
