//! Layered working document
//!
//! [`Image`] is a canvas with a stack of layers, bottom first. It stands in
//! for the editor document a 9-patch is authored in: artwork layers, the two
//! mask layers added by [`prepare`](crate::prepare), and the border layer
//! added by [`render`](crate::render).

use crate::error::{RenderError, RenderResult};
use crate::layer::{Layer, LayerId, LayerKind, MaskLayer, MaskRole, Offset};
use ninepatch_core::Raster;
use std::path::{Path, PathBuf};

/// Typed handles to the two masks of a prepared image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NinePatchMasks {
    pub stretch: LayerId,
    pub content: LayerId,
}

/// A layered image
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    xres: u32,
    yres: u32,
    source: Option<PathBuf>,
    layers: Vec<Layer>,
    next_id: u32,
}

impl Image {
    /// Create an empty image with the given canvas size.
    ///
    /// # Errors
    ///
    /// Returns a core error if width or height is 0.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(ninepatch_core::Error::InvalidDimension { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            xres: 0,
            yres: 0,
            source: None,
            layers: Vec::new(),
            next_id: 1,
        })
    }

    /// Create a single-layer image from a raster.
    ///
    /// The canvas takes the raster's size and resolution.
    pub fn from_raster(raster: Raster) -> Self {
        let mut image = Self {
            width: raster.width(),
            height: raster.height(),
            xres: raster.xres(),
            yres: raster.yres(),
            source: None,
            layers: Vec::new(),
            next_id: 1,
        };
        image.add_layer("Background", LayerKind::Artwork, raster, Offset::ORIGIN);
        image
    }

    /// Read a PNG file into a single-layer image remembering its path.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let raster = ninepatch_io::read_image(path)?;
        Ok(Self::from_raster(raster).with_source(path))
    }

    /// Set the source path used to name exported files.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal resolution in ppi (0 when unknown)
    pub fn xres(&self) -> u32 {
        self.xres
    }

    /// Vertical resolution in ppi (0 when unknown)
    pub fn yres(&self) -> u32 {
        self.yres
    }

    pub fn set_resolution(&mut self, xres: u32, yres: u32) {
        self.xres = xres;
        self.yres = yres;
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Layers from bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Push a layer on top of the stack and return its handle.
    pub fn add_layer(
        &mut self,
        name: &str,
        kind: LayerKind,
        raster: Raster,
        offset: Offset,
    ) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            name: name.to_string(),
            kind,
            offset,
            visible: true,
            raster,
        });
        id
    }

    /// Remove a layer, returning it if it was present.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.id == id)?;
        Some(self.layers.remove(index))
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> RenderResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(RenderError::LayerNotFound(id))
    }

    /// Show or hide a layer.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> RenderResult<()> {
        self.layer_mut(id)?.visible = visible;
        Ok(())
    }

    /// Replace the pixels of a layer, keeping its offset.
    pub fn set_raster(&mut self, id: LayerId, raster: Raster) -> RenderResult<()> {
        self.layer_mut(id)?.raster = raster;
        Ok(())
    }

    /// Move a layer to a new offset.
    pub fn set_offset(&mut self, id: LayerId, offset: Offset) -> RenderResult<()> {
        self.layer_mut(id)?.offset = offset;
        Ok(())
    }

    /// First mask layer with the given role
    pub fn mask(&self, role: MaskRole) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.kind == LayerKind::Mask(role))
    }

    /// Handles to both masks, or `None` unless the image is prepared.
    pub fn ninepatch_masks(&self) -> Option<NinePatchMasks> {
        Some(NinePatchMasks {
            stretch: self.mask(MaskRole::Stretch)?.id,
            content: self.mask(MaskRole::Content)?.id,
        })
    }

    /// Mask view of a layer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::LayerNotFound`] for a stale handle.
    pub fn mask_layer(&self, id: LayerId) -> RenderResult<MaskLayer> {
        self.layer(id)
            .map(Layer::as_mask)
            .ok_or(RenderError::LayerNotFound(id))
    }

    /// The border layer, if the image has been rendered in place
    pub fn border_layer(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == LayerKind::Border)
    }

    /// Hide every mask layer.
    pub fn hide_masks(&mut self) {
        for layer in &mut self.layers {
            if layer.mask_role().is_some() {
                layer.visible = false;
            }
        }
    }

    /// Resize the canvas and move every layer by `(dx, dy)`.
    ///
    /// Layer pixels are not touched.
    pub fn resize_canvas(&mut self, width: u32, height: u32, dx: i32, dy: i32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(ninepatch_core::Error::InvalidDimension { width, height }.into());
        }
        self.width = width;
        self.height = height;
        for layer in &mut self.layers {
            layer.offset = layer.offset.shifted(dx, dy);
        }
        Ok(())
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Copy with private pixel buffers for every layer.
    ///
    /// Layer handles are preserved.
    pub fn deep_copy(&self) -> Self {
        let mut copy = self.clone();
        for layer in &mut copy.layers {
            layer.raster = layer.raster.deep_clone();
        }
        copy
    }
}
