//! Image scaling operations
//!
//! Provides the resampling filters used by the density pipeline:
//! - Sampling (nearest neighbor)
//! - Linear interpolation (triangle filter)
//! - Cubic interpolation (Catmull-Rom, the default smooth filter)
//!
//! Linear and cubic scaling run as two separable passes over
//! premultiplied RGBA, so transparent pixels never bleed their color into
//! neighbors. When downscaling, the filter support widens by the reduction
//! ratio so every source pixel contributes.
//!
//! The same method and factor applied to an artwork layer and to its masks
//! produces masks that still line up with the artwork at the new size.

use crate::{TransformError, TransformResult};
use ninepatch_core::{Raster, RasterMut, color};

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation
    Linear,
    /// Catmull-Rom bicubic interpolation
    #[default]
    Cubic,
}

impl ScaleMethod {
    /// Parse a method name (`nearest`/`sampling`, `linear`, `cubic`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nearest" | "sampling" => Some(Self::Sampling),
            "linear" | "bilinear" => Some(Self::Linear),
            "cubic" | "bicubic" | "catmull-rom" => Some(Self::Cubic),
            _ => None,
        }
    }

    /// Half-width of the filter kernel at unit scale.
    fn support(self) -> f32 {
        match self {
            Self::Sampling => 0.5,
            Self::Linear => 1.0,
            Self::Cubic => 2.0,
        }
    }

    fn kernel(self, x: f32) -> f32 {
        let x = x.abs();
        match self {
            Self::Sampling => {
                if x < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Linear => (1.0 - x).max(0.0),
            // Catmull-Rom (B = 0, C = 0.5)
            Self::Cubic => {
                if x < 1.0 {
                    1.5 * x * x * x - 2.5 * x * x + 1.0
                } else if x < 2.0 {
                    -0.5 * x * x * x + 2.5 * x * x - 4.0 * x + 2.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Compute a scaled extent: `round(factor * extent)`, at least 1.
pub fn scaled_dimension(extent: u32, factor: f64) -> u32 {
    let v = (extent as f64 * factor).round();
    if v < 1.0 {
        1
    } else if v > u32::MAX as f64 {
        u32::MAX
    } else {
        v as u32
    }
}

/// Scale an image by the given factors
///
/// Output dimensions are `round(scale_x * width)` by
/// `round(scale_y * height)`, each at least 1.
///
/// # Arguments
/// * `raster` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Scaling algorithm to use
pub fn scale(raster: &Raster, scale_x: f32, scale_y: f32, method: ScaleMethod) -> TransformResult<Raster> {
    check_factor(scale_x)?;
    check_factor(scale_y)?;
    let w = scaled_dimension(raster.width(), scale_x as f64);
    let h = scaled_dimension(raster.height(), scale_y as f64);
    scale_to_size(raster, w, h, method)
}

/// Scale an image to a specific size
///
/// # Arguments
/// * `raster` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
/// * `method` - Scaling algorithm to use
pub fn scale_to_size(
    raster: &Raster,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Raster> {
    let (w, h) = match (width, height) {
        (0, 0) => {
            return Err(TransformError::InvalidParameters(
                "target width and height are both 0".to_string(),
            ));
        }
        (0, h) => (
            scaled_dimension(raster.width(), h as f64 / raster.height() as f64),
            h,
        ),
        (w, 0) => (
            w,
            scaled_dimension(raster.height(), w as f64 / raster.width() as f64),
        ),
        (w, h) => (w, h),
    };

    if w == raster.width() && h == raster.height() {
        return Ok(raster.deep_clone());
    }

    match method {
        ScaleMethod::Sampling => sample(raster, w, h),
        ScaleMethod::Linear | ScaleMethod::Cubic => resample(raster, w, h, method),
    }
}

/// Scale an image using nearest-neighbor sampling
///
/// # Arguments
/// * `raster` - Input image
/// * `scale_x` - Horizontal scale factor
/// * `scale_y` - Vertical scale factor
pub fn scale_by_sampling(raster: &Raster, scale_x: f32, scale_y: f32) -> TransformResult<Raster> {
    scale(raster, scale_x, scale_y, ScaleMethod::Sampling)
}

fn check_factor(factor: f32) -> TransformResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "scale factor must be positive and finite, got {factor}"
        )));
    }
    Ok(())
}

fn sample(raster: &Raster, w: u32, h: u32) -> TransformResult<Raster> {
    let sw = raster.width();
    let sh = raster.height();
    let xmap: Vec<u32> = (0..w).map(|x| nearest_index(x, sw, w)).collect();

    let mut out = RasterMut::new(w, h)?;
    out.copy_resolution_from(raster);
    for y in 0..h {
        let src_row = raster.row_data(nearest_index(y, sh, h));
        let dst_row = out.row_data_mut(y);
        for (dst, &sx) in dst_row.iter_mut().zip(&xmap) {
            *dst = src_row[sx as usize];
        }
    }
    Ok(out.into())
}

#[inline]
fn nearest_index(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let ratio = src_len as f64 / dst_len as f64;
    let s = ((dst as f64 + 0.5) * ratio).floor() as i64;
    s.clamp(0, src_len as i64 - 1) as u32
}

/// Filter taps for one output coordinate.
struct Contribution {
    indices: Vec<usize>,
    weights: Vec<f32>,
}

fn contributions(src_len: u32, dst_len: u32, method: ScaleMethod) -> Vec<Contribution> {
    let ratio = src_len as f32 / dst_len as f32;
    let filter_scale = ratio.max(1.0);
    let radius = method.support() * filter_scale;
    let last = src_len as i64 - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f32 + 0.5) * ratio - 0.5;
            let lo = (center - radius).floor() as i64;
            let hi = (center + radius).ceil() as i64;

            let mut indices = Vec::with_capacity((hi - lo + 1) as usize);
            let mut weights = Vec::with_capacity((hi - lo + 1) as usize);
            for s in lo..=hi {
                let w = method.kernel((s as f32 - center) / filter_scale);
                if w == 0.0 {
                    continue;
                }
                indices.push(s.clamp(0, last) as usize);
                weights.push(w);
            }

            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                for w in &mut weights {
                    *w /= sum;
                }
            } else {
                indices.clear();
                weights.clear();
                indices.push(center.round().clamp(0.0, last as f32) as usize);
                weights.push(1.0);
            }
            Contribution { indices, weights }
        })
        .collect()
}

type Premul = [f32; 4];

#[inline]
fn premultiply(pixel: u32) -> Premul {
    let (r, g, b, a) = color::extract_rgba(pixel);
    let af = a as f32 / 255.0;
    [r as f32 * af, g as f32 * af, b as f32 * af, a as f32]
}

#[inline]
fn unpremultiply(p: Premul) -> u32 {
    let a = p[3].round().clamp(0.0, 255.0);
    if a <= 0.0 {
        return color::TRANSPARENT;
    }
    // Divide by the unrounded alpha so straight colors survive exactly.
    let inv = 255.0 / p[3];
    let ch = |v: f32| (v * inv).round().clamp(0.0, 255.0) as u8;
    color::compose_rgba(ch(p[0]), ch(p[1]), ch(p[2]), a as u8)
}

fn resample(raster: &Raster, w: u32, h: u32, method: ScaleMethod) -> TransformResult<Raster> {
    let sw = raster.width() as usize;
    let sh = raster.height() as usize;
    let dw = w as usize;

    let xcontrib = contributions(raster.width(), w, method);
    let ycontrib = contributions(raster.height(), h, method);

    let src: Vec<Premul> = raster.data().iter().map(|&p| premultiply(p)).collect();

    // Horizontal pass: sh rows of dw samples
    let mut tmp = vec![[0.0f32; 4]; dw * sh];
    for y in 0..sh {
        let row = &src[y * sw..(y + 1) * sw];
        let out = &mut tmp[y * dw..(y + 1) * dw];
        for (dst, c) in out.iter_mut().zip(&xcontrib) {
            let mut acc = [0.0f32; 4];
            for (&i, &wt) in c.indices.iter().zip(&c.weights) {
                for k in 0..4 {
                    acc[k] += row[i][k] * wt;
                }
            }
            *dst = acc;
        }
    }

    // Vertical pass
    let mut out = RasterMut::new(w, h)?;
    out.copy_resolution_from(raster);
    for (y, c) in ycontrib.iter().enumerate() {
        let dst_row = out.row_data_mut(y as u32);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = [0.0f32; 4];
            for (&i, &wt) in c.indices.iter().zip(&c.weights) {
                let s = &tmp[i * dw + x];
                for k in 0..4 {
                    acc[k] += s[k] * wt;
                }
            }
            *dst = unpremultiply(acc);
        }
    }

    Ok(out.into())
}
