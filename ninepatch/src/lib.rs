//! ninepatch - Android 9-patch images for Rust
//!
//! Renders the 1-pixel 9-patch border of an image from two region masks
//! and exports the result for each Android screen density.
//!
//! # Overview
//!
//! - Raster container and compositing ([`Raster`], [`RasterMut`])
//! - PNG I/O with density metadata ([`io`])
//! - Resampling ([`transform`])
//! - Mask analysis, border encoding and density export ([`render`])
//!
//! # Example
//!
//! ```
//! use ninepatch::{Image, MaskRole, RenderOptions, RenderOutcome, prepare, render};
//! use ninepatch::{RasterMut, color};
//!
//! let mut art = RasterMut::new(8, 8).unwrap();
//! art.fill(0x3366_99ff);
//! let mut image = Image::from_raster(art.into());
//!
//! let masks = prepare(&mut image).unwrap();
//! let mut stretch = image.layer(masks.stretch).unwrap().raster().to_mut();
//! stretch.set_pixel(3, 3, color::OPAQUE_BLACK).unwrap();
//! image.set_raster(masks.stretch, stretch.into()).unwrap();
//!
//! let outcome = render(&mut image, &RenderOptions::default()).unwrap();
//! assert_eq!(outcome, RenderOutcome::Rendered);
//! assert_eq!(image.width(), 10);
//! assert!(image.mask(MaskRole::Stretch).is_some());
//! ```

// Core types are used everywhere
pub use ninepatch_core::*;

// Domain crates as modules
pub use ninepatch_io as io;
pub use ninepatch_render as render;
pub use ninepatch_transform as transform;

// The 9-patch workflow at the top level
pub use ninepatch_render::{
    AnalyzerStrategy, BorderSpec, Density, DensityTarget, ExportConfig, ExportContext,
    ExportReport, Image, Layer, LayerId, LayerKind, MaskRole, NinePatchMasks, Offset,
    RenderError, RenderOptions, RenderOutcome, TargetOutcome, decode, encode, export,
    is_ninepatch, prepare, save, save_resolutions,
};
// Function only; `render` the module is the crate alias above
pub use ninepatch_render::render::render;
pub use ninepatch_transform::ScaleMethod;
