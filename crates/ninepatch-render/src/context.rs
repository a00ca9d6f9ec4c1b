//! Collaborators of the export pipeline
//!
//! Each service the pipeline needs from its environment sits behind a small
//! trait. [`ExportContext`] bundles one implementation of each and is
//! passed to [`export`](crate::export) explicitly. The defaults use the
//! workspace crates and the real file system; tests swap in their own.

use crate::error::RenderResult;
use crate::image::Image;
use ninepatch_core::{Raster, RasterMut};
use ninepatch_io::{ImageFormat, IoResult};
use ninepatch_transform::ScaleMethod;
use std::path::Path;

/// Resamples a raster to an exact size
pub trait Scaler {
    fn scale(
        &self,
        raster: &Raster,
        width: u32,
        height: u32,
        method: ScaleMethod,
    ) -> RenderResult<Raster>;
}

/// Flattens the visible layers of an image onto one canvas-sized raster
pub trait Compositor {
    fn flatten(&self, image: &Image) -> RenderResult<Raster>;
}

/// Writes a raster as a PNG file
pub trait RasterEncoder {
    fn write_png(&self, raster: &Raster, path: &Path) -> IoResult<()>;
}

/// Creates output directories
pub trait FileSystem {
    /// Create `path` and its parents. An existing directory is not an error.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// [`Scaler`] backed by `ninepatch-transform`
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformScaler;

impl Scaler for TransformScaler {
    fn scale(
        &self,
        raster: &Raster,
        width: u32,
        height: u32,
        method: ScaleMethod,
    ) -> RenderResult<Raster> {
        Ok(ninepatch_transform::scale_to_size(
            raster, width, height, method,
        )?)
    }
}

/// [`Compositor`] blending visible layers bottom to top with "over"
#[derive(Debug, Clone, Copy, Default)]
pub struct OverCompositor;

impl Compositor for OverCompositor {
    fn flatten(&self, image: &Image) -> RenderResult<Raster> {
        let mut canvas = RasterMut::new(image.width(), image.height())?;
        canvas.set_resolution(image.xres(), image.yres());
        for layer in image.layers().iter().filter(|l| l.is_visible()) {
            let offset = layer.offset();
            canvas.blend_over_in_place(layer.raster(), offset.left, offset.top);
        }
        Ok(canvas.into())
    }
}

/// [`RasterEncoder`] backed by `ninepatch-io`
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl RasterEncoder for PngEncoder {
    fn write_png(&self, raster: &Raster, path: &Path) -> IoResult<()> {
        ninepatch_io::write_image(raster, path, ImageFormat::Png)
    }
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// The services used by the export pipeline
#[derive(Clone, Copy)]
pub struct ExportContext<'a> {
    pub scaler: &'a dyn Scaler,
    pub compositor: &'a dyn Compositor,
    pub encoder: &'a dyn RasterEncoder,
    pub fs: &'a dyn FileSystem,
}

impl Default for ExportContext<'static> {
    fn default() -> Self {
        Self {
            scaler: &TransformScaler,
            compositor: &OverCompositor,
            encoder: &PngEncoder,
            fs: &StdFileSystem,
        }
    }
}

impl<'a> ExportContext<'a> {
    pub fn with_scaler(self, scaler: &'a dyn Scaler) -> Self {
        Self { scaler, ..self }
    }

    pub fn with_compositor(self, compositor: &'a dyn Compositor) -> Self {
        Self { compositor, ..self }
    }

    pub fn with_encoder(self, encoder: &'a dyn RasterEncoder) -> Self {
        Self { encoder, ..self }
    }

    pub fn with_fs(self, fs: &'a dyn FileSystem) -> Self {
        Self { fs, ..self }
    }
}

impl std::fmt::Debug for ExportContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportContext").finish_non_exhaustive()
    }
}
