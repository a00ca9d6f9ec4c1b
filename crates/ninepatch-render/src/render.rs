//! Preparing and rendering a 9-patch document in place

use crate::analyze::{AnalyzerStrategy, MaskAnalyzer};
use crate::encode::{BorderSpec, encode};
use crate::error::RenderResult;
use crate::expand::expand_canvas;
use crate::image::{Image, NinePatchMasks};
use crate::layer::{LayerId, LayerKind, MaskRole, Offset};
use crate::transaction::WorkingCopy;
use log::debug;
use ninepatch_core::{Raster, RasterMut};
use ninepatch_transform::ScaleMethod;
use std::path::Path;

/// Name of the layer holding the border ring
pub const BORDER_LAYER_NAME: &str = "9-patch border";

/// Base name used when an image has no source file
pub const UNTITLED: &str = "untitled";

/// Options controlling how a border is derived and how images are scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// How mask pixels become active lines (default: line scan)
    pub strategy: AnalyzerStrategy,
    /// Resampling filter for density targets (default: cubic)
    pub scale_method: ScaleMethod,
}

impl RenderOptions {
    pub fn with_strategy(mut self, strategy: AnalyzerStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_scale_method(mut self, method: ScaleMethod) -> Self {
        self.scale_method = method;
        self
    }
}

/// What [`render`] did to the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Canvas expanded, border layer added, masks hidden
    Rendered,
    /// The image lacks one or both masks; nothing changed
    NotEligible,
    /// The image already carries a border layer; nothing changed
    AlreadyRendered,
}

/// Add the stretch and content masks to `image`.
///
/// Masks are blank, transparent and cover the whole canvas. Masks that
/// already exist are kept, so preparing twice returns the same handles.
pub fn prepare(image: &mut Image) -> RenderResult<NinePatchMasks> {
    Ok(NinePatchMasks {
        stretch: ensure_mask(image, MaskRole::Stretch)?,
        content: ensure_mask(image, MaskRole::Content)?,
    })
}

fn ensure_mask(image: &mut Image, role: MaskRole) -> RenderResult<LayerId> {
    if let Some(layer) = image.mask(role) {
        return Ok(layer.id());
    }
    let mut raster = RasterMut::new(image.width(), image.height())?;
    raster.set_resolution(image.xres(), image.yres());
    debug!("prepare: adding {:?} mask", role);
    Ok(image.add_layer(
        role.layer_name(),
        LayerKind::Mask(role),
        raster.into(),
        Offset::ORIGIN,
    ))
}

/// Whether `image` has both 9-patch masks
pub fn is_ninepatch(image: &Image) -> bool {
    image.ninepatch_masks().is_some()
}

/// Derive the border of `image` from its masks at the current canvas size.
pub fn border_spec(
    image: &Image,
    masks: NinePatchMasks,
    analyzer: &dyn MaskAnalyzer,
) -> RenderResult<BorderSpec> {
    BorderSpec::from_masks(
        analyzer,
        &image.mask_layer(masks.stretch)?,
        &image.mask_layer(masks.content)?,
        image.width(),
        image.height(),
    )
}

/// Render the border of a prepared image in place.
///
/// The canvas grows by one pixel on every side, a visible border layer is
/// added on top and both masks are hidden. All edits go through a working
/// copy: on error `image` is left unchanged.
pub fn render(image: &mut Image, options: &RenderOptions) -> RenderResult<RenderOutcome> {
    render_with(image, &options.strategy)
}

/// [`render`] with an explicit mask analyzer.
pub fn render_with(image: &mut Image, analyzer: &dyn MaskAnalyzer) -> RenderResult<RenderOutcome> {
    let Some(masks) = image.ninepatch_masks() else {
        debug!("render: image has no 9-patch masks");
        return Ok(RenderOutcome::NotEligible);
    };
    if image.border_layer().is_some() {
        debug!("render: image already has a border layer");
        return Ok(RenderOutcome::AlreadyRendered);
    }

    let mut work = WorkingCopy::acquire(image, "render");
    let doc = work.image_mut();
    expand_canvas(doc)?;
    // the border is derived at the artwork size, before expansion
    let spec = border_spec(image, masks, analyzer)?;

    let mut ring = RasterMut::new(spec.expanded_width(), spec.expanded_height())?;
    ring.set_resolution(doc.xres(), doc.yres());
    encode(&spec, &mut ring)?;
    doc.add_layer(
        BORDER_LAYER_NAME,
        LayerKind::Border,
        Raster::from(ring),
        Offset::ORIGIN,
    );
    doc.set_visible(masks.stretch, false)?;
    doc.set_visible(masks.content, false)?;

    *image = work.commit();
    Ok(RenderOutcome::Rendered)
}

/// Output file name for an image.
///
/// The base name is the source file name without its extension (and
/// without a trailing `.9`, so `button.9.png` stays `button`), or
/// `untitled` when there is no source.
pub fn ninepatch_file_name(source: Option<&Path>, eligible: bool) -> String {
    let stem = source
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty());
    let base = match stem.as_deref() {
        Some(s) => s.strip_suffix(".9").unwrap_or(s),
        None => UNTITLED,
    };
    if eligible {
        format!("{base}.9.png")
    } else {
        format!("{base}.png")
    }
}
