//! ninepatch-transform - Raster resampling
//!
//! This crate provides the scaling operations used when a 9-patch source
//! is re-rendered for another density bucket:
//!
//! - Nearest-neighbor sampling
//! - Bilinear interpolation
//! - Cubic (Catmull-Rom) interpolation, the default smooth filter

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale, scale_by_sampling, scale_to_size, scaled_dimension};
