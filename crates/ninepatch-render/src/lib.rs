//! ninepatch-render - Android 9-patch rendering
//!
//! Turns an image with two region masks into the Android 9-patch format: a
//! 1-pixel ring of opaque-black markers around the artwork. The *stretch*
//! mask marks the rows and columns that may stretch (left and top edges);
//! the *content* mask marks the area content is laid out in (right and
//! bottom edges).
//!
//! # Pipeline
//!
//! 1. [`MaskAnalyzer`] reduces each mask to per-line activity
//! 2. [`expand`] grows the artwork by one transparent pixel on every side
//! 3. [`encode`] writes the border ring from a [`BorderSpec`]
//! 4. [`export`] repeats this per [`DensityTarget`] on scaled copies of the
//!    original, so each density gets a border derived at its own size
//!
//! # Example
//!
//! ```no_run
//! use ninepatch_render::{ExportConfig, ExportContext, Image, prepare, save_resolutions};
//!
//! let mut image = Image::open("button.png")?;
//! prepare(&mut image)?;
//! // ... paint into the masks ...
//! let report = save_resolutions(&ExportContext::default(), &image, "app", &ExportConfig::default())?;
//! assert!(report.is_success());
//! # Ok::<(), ninepatch_render::RenderError>(())
//! ```

pub mod activity;
pub mod analyze;
pub mod context;
pub mod density;
pub mod encode;
mod error;
pub mod expand;
pub mod image;
pub mod layer;
pub mod pipeline;
pub mod render;
pub mod transaction;

pub use activity::{Axis, LineActivitySet};
pub use analyze::{AnalyzerStrategy, BoundingBox, LineScan, MaskAnalyzer};
pub use context::{
    Compositor, ExportContext, FileSystem, OverCompositor, PngEncoder, RasterEncoder, Scaler,
    StdFileSystem, TransformScaler,
};
pub use density::{DEFAULT_SOURCE_DPI, Density, DensityTarget, ExportConfig};
pub use encode::{BorderSpec, decode, encode, is_well_formed};
pub use error::{RenderError, RenderResult};
pub use expand::{expand, expand_canvas, strip_border};
pub use image::{Image, NinePatchMasks};
pub use layer::{Layer, LayerId, LayerKind, MaskLayer, MaskRole, Offset};
pub use pipeline::{
    ExportReport, TargetOutcome, export, render_scaled, save, save_resolutions, scale_image,
};
pub use render::{
    BORDER_LAYER_NAME, RenderOptions, RenderOutcome, UNTITLED, border_spec, is_ninepatch,
    ninepatch_file_name, prepare, render, render_with,
};
pub use transaction::WorkingCopy;
