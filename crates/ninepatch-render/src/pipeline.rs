//! Multi-density export
//!
//! Every target is produced from its own scaled copy of the un-bordered
//! original: the masks are scaled with the artwork, the border is derived
//! again at the new size, and the result is flattened and written. Targets
//! do not share state, and a failing target does not stop the others.

use crate::context::{ExportContext, Scaler};
use crate::density::{DensityTarget, ExportConfig};
use crate::encode::encode;
use crate::error::{RenderError, RenderResult};
use crate::expand::{expand, strip_border};
use crate::image::Image;
use crate::layer::Offset;
use crate::render::{RenderOptions, border_spec, is_ninepatch, ninepatch_file_name};
use crate::transaction::WorkingCopy;
use log::{info, warn};
use ninepatch_core::{Raster, RasterMut};
use ninepatch_transform::{ScaleMethod, scaled_dimension};
use std::path::{Path, PathBuf};

/// Result of one density target
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: DensityTarget,
    /// Path of the written file, or why the target failed
    pub result: RenderResult<PathBuf>,
}

impl TargetOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn path(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(PathBuf::as_path)
    }

    pub fn error(&self) -> Option<&RenderError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of an export, in target order
#[derive(Debug, Default)]
pub struct ExportReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl ExportReport {
    /// True if every target was written
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_ok)
    }

    /// Paths of the files that were written
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes.iter().filter_map(TargetOutcome::path).collect()
    }

    pub fn failures(&self) -> Vec<&TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok()).collect()
    }
}

/// Scale every layer of `image` by `factor`.
///
/// Layer sizes and the canvas become `round(factor * extent)` (at least 1)
/// and offsets `round(factor * offset)`. Artwork layers go through
/// `method`. Mask layers are resampled by pixel-centre coverage in canvas
/// coordinates instead, so a mask run `[a, b)` lands on
/// `[round(factor * a), round(factor * b))` whatever the filter. A known
/// resolution is scaled with the pixels.
pub fn scale_image(
    scaler: &dyn Scaler,
    image: &mut Image,
    factor: f64,
    method: ScaleMethod,
) -> RenderResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(RenderError::InvalidDensity(format!(
            "scale factor {factor} must be finite and positive"
        )));
    }
    for layer in image.layers_mut() {
        if layer.mask_role().is_some() {
            let (raster, offset) = resample_mask(&layer.raster, layer.offset, factor)?;
            layer.raster = raster;
            layer.offset = offset;
            continue;
        }
        let width = scaled_dimension(layer.raster.width(), factor);
        let height = scaled_dimension(layer.raster.height(), factor);
        layer.raster = scaler.scale(&layer.raster, width, height, method)?;
        layer.offset = layer.offset.scaled(factor);
    }
    image.set_size(
        scaled_dimension(image.width(), factor),
        scaled_dimension(image.height(), factor),
    );
    if image.xres() > 0 && image.yres() > 0 {
        image.set_resolution(
            scaled_dimension(image.xres(), factor),
            scaled_dimension(image.yres(), factor),
        );
    }
    Ok(())
}

/// Source coordinate whose pixel covers the centre of destination pixel
/// `dst`. A centre falling exactly on a source pixel boundary belongs to
/// the earlier pixel.
fn covering_index(dst: i64, factor: f64) -> i64 {
    ((dst as f64 + 0.5) / factor).ceil() as i64 - 1
}

fn resample_mask(mask: &Raster, offset: Offset, factor: f64) -> RenderResult<(Raster, Offset)> {
    let scaled_offset = offset.scaled(factor);
    let width = scaled_dimension(mask.width(), factor);
    let height = scaled_dimension(mask.height(), factor);

    // local source index for a local destination index, if on the mask
    let source = |dst: u32, from: i32, to: i32, extent: u32| -> Option<usize> {
        let local = covering_index(to as i64 + dst as i64, factor) - from as i64;
        (0..extent as i64).contains(&local).then_some(local as usize)
    };
    let xmap: Vec<Option<usize>> = (0..width)
        .map(|x| source(x, offset.left, scaled_offset.left, mask.width()))
        .collect();

    let mut out = RasterMut::new(width, height)?;
    out.copy_resolution_from(mask);
    for y in 0..height {
        let Some(sy) = source(y, offset.top, scaled_offset.top, mask.height()) else {
            continue;
        };
        let src_row = mask.row_data(sy as u32);
        let dst_row = out.row_data_mut(y);
        for (dst, sx) in dst_row.iter_mut().zip(&xmap) {
            if let Some(sx) = *sx {
                *dst = src_row[sx];
            }
        }
    }
    Ok((out.into(), scaled_offset))
}

/// Produce the output raster of `original` at `factor`.
///
/// For a 9-patch image the result carries the border ring and is two
/// pixels larger than the scaled artwork; otherwise it is the plain
/// flattened artwork. `original` is not modified.
pub fn render_scaled(
    ctx: &ExportContext<'_>,
    original: &Image,
    factor: f64,
    options: &RenderOptions,
) -> RenderResult<Raster> {
    let mut work = WorkingCopy::acquire(original, "export");
    let doc = work.image_mut();
    strip_border(doc)?;
    scale_image(ctx.scaler, doc, factor, options.scale_method)?;

    let spec = match doc.ninepatch_masks() {
        Some(masks) => Some(border_spec(doc, masks, &options.strategy)?),
        None => None,
    };
    doc.hide_masks();
    let flat = ctx.compositor.flatten(doc)?;
    let Some(spec) = spec else {
        return Ok(flat);
    };

    let mut canvas = expand(&flat)?
        .try_into_mut()
        .unwrap_or_else(|shared| shared.to_mut());
    encode(&spec, &mut canvas)?;
    Ok(canvas.into())
}

fn export_target(
    ctx: &ExportContext<'_>,
    original: &Image,
    target: &DensityTarget,
    file_name: &str,
    options: &RenderOptions,
) -> RenderResult<PathBuf> {
    let dir = target.directory();
    ctx.fs
        .create_dir_all(dir)
        .map_err(|source| RenderError::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;

    let raster = render_scaled(ctx, original, target.scale(), options)?;
    let path = dir.join(file_name);
    ctx.encoder
        .write_png(&raster, &path)
        .map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
    info!(
        "{}: wrote {}x{} to {}",
        target.name(),
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(path)
}

/// Export `original` once per target.
///
/// Images with both masks are written as `<name>.9.png` with a border
/// derived at each target's size; other images are written scaled as
/// `<name>.png`. Each target's success or failure is reported separately.
pub fn export(
    ctx: &ExportContext<'_>,
    original: &Image,
    targets: &[DensityTarget],
    options: &RenderOptions,
) -> ExportReport {
    let eligible = is_ninepatch(original);
    let file_name = ninepatch_file_name(original.source(), eligible);
    info!(
        "exporting {} ({}) to {} targets",
        file_name,
        if eligible { "9-patch" } else { "plain" },
        targets.len()
    );

    let outcomes = targets
        .iter()
        .map(|target| {
            let result = export_target(ctx, original, target, &file_name, options);
            if let Err(e) = &result {
                warn!("{}: {}", target.name(), e);
            }
            TargetOutcome {
                target: target.clone(),
                result,
            }
        })
        .collect();
    ExportReport { outcomes }
}

/// Export `image` at a single scale into `directory`.
pub fn save(
    ctx: &ExportContext<'_>,
    image: &Image,
    directory: impl AsRef<Path>,
    scale: f64,
    options: &RenderOptions,
) -> RenderResult<PathBuf> {
    let target = DensityTarget::new("output", scale, directory.as_ref())?;
    let file_name = ninepatch_file_name(image.source(), is_ninepatch(image));
    export_target(ctx, image, &target, &file_name, options)
}

/// Export `image` to the standard Android resource directories under
/// `<project_root>/res`.
///
/// # Errors
///
/// Fails before writing anything if a target cannot be built, e.g. for a
/// configured source resolution of 0. Failures of individual targets are
/// reported in the returned [`ExportReport`].
pub fn save_resolutions(
    ctx: &ExportContext<'_>,
    image: &Image,
    project_root: impl AsRef<Path>,
    config: &ExportConfig,
) -> RenderResult<ExportReport> {
    let dpi = config.resolve_source_dpi(image.xres());
    let targets = config.targets(image.xres(), project_root.as_ref())?;

    // scale from the resolved resolution so outputs carry their bucket dpi
    let mut source = image.clone();
    if source.xres() != dpi {
        source.set_resolution(dpi, dpi);
    }
    Ok(export(ctx, &source, &targets, &config.render))
}
