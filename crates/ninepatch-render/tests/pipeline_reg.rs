//! Multi-density export regression test
//!
//! Exports prepared images through the full pipeline and checks the files
//! written for each density bucket.

use ninepatch_core::{Raster, RasterMut, color};
use ninepatch_io::{IoError, IoResult};
use ninepatch_render::{
    Axis, Density, DensityTarget, ExportConfig, ExportContext, FileSystem, Image, LayerKind,
    LineActivitySet, LineScan, MaskAnalyzer, MaskLayer, MaskRole, PngEncoder, RasterEncoder,
    RenderError, RenderOptions, RenderOutcome, StdFileSystem, decode, export, is_well_formed,
    prepare, render, render_scaled, render_with, save, save_resolutions,
};
use ninepatch_test::{RegParams, load_image, scratch_dir};
use ninepatch_transform::ScaleMethod;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn button(w: u32, h: u32) -> Image {
    let mut m = RasterMut::new(w, h).expect("artwork");
    m.fill(0x2266_aaff);
    Image::from_raster(m.into()).with_source("art/button.png")
}

fn paint(image: &mut Image, role: MaskRole, x0: u32, y0: u32, x1: u32, y1: u32) {
    let layer = image.mask(role).expect("mask");
    let id = layer.id();
    let mut m = layer.raster().to_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            m.set_pixel(x, y, color::OPAQUE_BLACK).expect("set");
        }
    }
    image.set_raster(id, m.into()).expect("set raster");
}

fn prepared_button() -> Image {
    let mut image = button(10, 10);
    prepare(&mut image).expect("prepare");
    paint(&mut image, MaskRole::Stretch, 4, 3, 6, 6);
    paint(&mut image, MaskRole::Content, 2, 2, 8, 8);
    image
}

/// Refuses to create directories whose path contains `needle`
struct FailingFs {
    needle: &'static str,
}

impl FileSystem for FailingFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if path.to_string_lossy().contains(self.needle) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        StdFileSystem.create_dir_all(path)
    }
}

/// Keeps encoded rasters in memory instead of writing files
#[derive(Default)]
struct MemoryEncoder {
    written: RefCell<Vec<(PathBuf, Raster)>>,
}

impl RasterEncoder for MemoryEncoder {
    fn write_png(&self, raster: &Raster, path: &Path) -> IoResult<()> {
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), raster.clone()));
        Ok(())
    }
}

/// Fails every write whose path contains `needle`
struct FailingEncoder {
    needle: &'static str,
}

impl RasterEncoder for FailingEncoder {
    fn write_png(&self, raster: &Raster, path: &Path) -> IoResult<()> {
        if path.to_string_lossy().contains(self.needle) {
            return Err(IoError::Io(io::Error::other("disk full")));
        }
        PngEncoder.write_png(raster, path)
    }
}

/// Reports rows for columns and columns for rows
struct SwappedAxes;

impl MaskAnalyzer for SwappedAxes {
    fn analyze(&self, mask: &MaskLayer, axis: Axis) -> LineActivitySet {
        let other = match axis {
            Axis::Rows => Axis::Columns,
            Axis::Columns => Axis::Rows,
        };
        LineScan.analyze(mask, other)
    }
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let ctx = ExportContext::default();

    // --- Test 1: standard buckets at the 160 dpi fallback ---
    let root = scratch_dir("pipeline_project").expect("scratch dir");
    let image = prepared_button();
    let report = save_resolutions(&ctx, &image, &root, &ExportConfig::default())
        .expect("save_resolutions");
    rp.compare_values(1.0, flag(report.is_success()), 0.0);
    rp.compare_values(3.0, report.written().len() as f64, 0.0);
    for (bucket, size, dpi) in [("mdpi", 12, 160), ("hdpi", 17, 240), ("xhdpi", 22, 320)] {
        let path = root
            .join("res")
            .join(format!("drawable-{bucket}"))
            .join("button.9.png");
        let out = load_image(&path).expect("load export");
        rp.compare_values(size as f64, out.width() as f64, 0.0);
        rp.compare_values(size as f64, out.height() as f64, 0.0);
        rp.compare_values(dpi as f64, out.xres() as f64, 1.0);
        rp.compare_values(1.0, flag(is_well_formed(&out)), 0.0);
        let spec = decode(&out).expect("decode");
        rp.compare_values(1.0, flag(spec.left().count() > 0), 0.0);
        rp.compare_values(1.0, flag(spec.bottom().count() > 0), 0.0);
    }
    // the source document is untouched
    rp.compare_values(10.0, image.width() as f64, 0.0);
    rp.compare_values(3.0, image.layers().len() as f64, 0.0);

    // --- Test 2: scale consistency, nearest sampling at 2x ---
    let options = RenderOptions::default().with_scale_method(ScaleMethod::Sampling);
    let out = render_scaled(&ctx, &image, 2.0, &options).expect("render 2x");
    let spec = decode(&out).expect("decode 2x");
    // stretch rows 3..6 -> 6..12, columns 4..6 -> 8..12
    rp.compare_values(1.0, flag(spec.left().runs() == vec![6..12]), 0.0);
    rp.compare_values(1.0, flag(spec.top().runs() == vec![8..12]), 0.0);
    rp.compare_values(1.0, flag(spec.right().runs() == vec![4..16]), 0.0);
    rp.compare_values(1.0, flag(spec.bottom().runs() == vec![4..16]), 0.0);
    let at_1x = decode(&render_scaled(&ctx, &image, 1.0, &options).expect("render 1x"))
        .expect("decode 1x");
    for run in at_1x.left().runs() {
        rp.compare_values(
            1.0,
            flag(spec.left().runs().contains(&(run.start * 2..run.end * 2))),
            0.0,
        );
    }

    // --- Test 3: default filter puts every edge at round(f * position) ---
    // stretch rows 3..6 and columns 4..6, content 2..8 on both axes
    let cases: [(f64, [std::ops::Range<u32>; 4]); 3] = [
        (2.0, [6..12, 8..12, 4..16, 4..16]),
        (1.5, [5..9, 6..9, 3..12, 3..12]),
        (0.75, [2..5, 3..5, 2..6, 2..6]),
    ];
    for (factor, [left, top, right, bottom]) in cases {
        let out = render_scaled(&ctx, &image, factor, &RenderOptions::default())
            .expect("render scaled");
        let spec = decode(&out).expect("decode scaled");
        rp.compare_values(1.0, flag(spec.left().runs() == vec![left]), 0.0);
        rp.compare_values(1.0, flag(spec.top().runs() == vec![top]), 0.0);
        rp.compare_values(1.0, flag(spec.right().runs() == vec![right]), 0.0);
        rp.compare_values(1.0, flag(spec.bottom().runs() == vec![bottom]), 0.0);
    }

    // --- Test 4: unprepared image exports plain ---
    let plain_dir = scratch_dir("pipeline_plain").expect("scratch dir");
    let plain = button(8, 6);
    let path = save(&ctx, &plain, &plain_dir, 1.5, &RenderOptions::default()).expect("save");
    rp.compare_values(
        1.0,
        flag(path.file_name().is_some_and(|n| n == "button.png")),
        0.0,
    );
    let out = load_image(&path).expect("load plain");
    rp.compare_values(12.0, out.width() as f64, 0.0);
    rp.compare_values(9.0, out.height() as f64, 0.0);
    rp.compare_values(0x2266_aaff as f64, out.get_pixel(0, 0).unwrap_or(0) as f64, 0.0);

    // --- Test 5: rendering is a no-op without masks and never doubles ---
    let mut doc = prepared_button();
    rp.compare_values(
        1.0,
        flag(render(&mut doc, &RenderOptions::default()).expect("render") == RenderOutcome::Rendered),
        0.0,
    );
    rp.compare_values(
        1.0,
        flag(
            render(&mut doc, &RenderOptions::default()).expect("render")
                == RenderOutcome::AlreadyRendered,
        ),
        0.0,
    );
    rp.compare_values(12.0, doc.width() as f64, 0.0);
    let masks = doc.ninepatch_masks().expect("masks");
    doc.remove_layer(masks.stretch);
    doc.remove_layer(masks.content);
    rp.compare_values(
        1.0,
        flag(render(&mut doc, &RenderOptions::default()).expect("render") == RenderOutcome::NotEligible),
        0.0,
    );
    rp.compare_values(12.0, doc.width() as f64, 0.0);
    // export strips the in-place border instead of bordering twice
    let out = render_scaled(&ctx, &doc, 1.0, &RenderOptions::default()).expect("render");
    rp.compare_values(10.0, out.width() as f64, 0.0);

    // --- Test 6: a failing target does not stop the others ---
    let root = scratch_dir("pipeline_faults").expect("scratch dir");
    let fs = FailingFs {
        needle: "drawable-hdpi",
    };
    let faulty = ExportContext::default().with_fs(&fs);
    let config = ExportConfig::default().with_ldpi(true);
    let report = save_resolutions(&faulty, &image, &root, &config).expect("save_resolutions");
    rp.compare_values(4.0, report.outcomes.len() as f64, 0.0);
    rp.compare_values(3.0, report.written().len() as f64, 0.0);
    let failures = report.failures();
    rp.compare_values(1.0, failures.len() as f64, 0.0);
    rp.compare_values(1.0, flag(failures[0].target.name() == "hdpi"), 0.0);
    rp.compare_values(
        1.0,
        flag(matches!(failures[0].error(), Some(RenderError::DirectoryCreate { .. }))),
        0.0,
    );
    for bucket in ["ldpi", "mdpi", "xhdpi"] {
        let path = root
            .join("res")
            .join(format!("drawable-{bucket}"))
            .join("button.9.png");
        rp.compare_values(1.0, flag(path.exists()), 0.0);
    }
    rp.compare_values(
        0.0,
        flag(root.join("res").join("drawable-hdpi").exists()),
        0.0,
    );

    // --- Test 7: collaborators are taken from the context ---
    let encoder = MemoryEncoder::default();
    let mem = ExportContext::default().with_encoder(&encoder);
    let dir = scratch_dir("pipeline_memory").expect("scratch dir");
    let targets = [
        DensityTarget::for_density(Density::Xxhdpi, 160, &dir).expect("target"),
        DensityTarget::new("half", 0.5, dir.join("half")).expect("target"),
    ];
    let report = export(&mem, &image, &targets, &RenderOptions::default());
    rp.compare_values(1.0, flag(report.is_success()), 0.0);
    let written = encoder.written.borrow();
    rp.compare_values(2.0, written.len() as f64, 0.0);
    rp.compare_values(32.0, written[0].1.width() as f64, 0.0);
    rp.compare_values(7.0, written[1].1.width() as f64, 0.0);
    rp.compare_values(
        1.0,
        flag(written[1].0 == dir.join("half").join("button.9.png")),
        0.0,
    );
    rp.compare_values(0.0, flag(dir.join("half").join("button.9.png").exists()), 0.0);


    // --- Test 8: a failed write does not stop the other targets ---
    let root = scratch_dir("pipeline_write_faults").expect("scratch dir");
    let encoder = FailingEncoder {
        needle: "drawable-xhdpi",
    };
    let faulty = ExportContext::default().with_encoder(&encoder);
    let report = save_resolutions(&faulty, &image, &root, &ExportConfig::default())
        .expect("save_resolutions");
    rp.compare_values(3.0, report.outcomes.len() as f64, 0.0);
    rp.compare_values(2.0, report.written().len() as f64, 0.0);
    let failures = report.failures();
    rp.compare_values(1.0, failures.len() as f64, 0.0);
    rp.compare_values(1.0, flag(failures[0].target.name() == "xhdpi"), 0.0);
    rp.compare_values(
        1.0,
        flag(matches!(failures[0].error(), Some(RenderError::Write { .. }))),
        0.0,
    );
    for bucket in ["mdpi", "hdpi"] {
        let path = root
            .join("res")
            .join(format!("drawable-{bucket}"))
            .join("button.9.png");
        rp.compare_values(1.0, flag(path.exists()), 0.0);
    }
    // the directory was created before the write failed
    rp.compare_values(1.0, flag(root.join("res").join("drawable-xhdpi").exists()), 0.0);
    rp.compare_values(
        0.0,
        flag(root.join("res").join("drawable-xhdpi").join("button.9.png").exists()),
        0.0,
    );

    // --- Test 9: a failed render leaves the image unchanged ---
    let mut doc = prepared_button();
    let result = render_with(&mut doc, &SwappedAxes);
    rp.compare_values(
        1.0,
        flag(matches!(result, Err(RenderError::Geometry { .. }))),
        0.0,
    );
    rp.compare_values(10.0, doc.width() as f64, 0.0);
    rp.compare_values(10.0, doc.height() as f64, 0.0);
    rp.compare_values(3.0, doc.layers().len() as f64, 0.0);
    rp.compare_values(0.0, flag(doc.border_layer().is_some()), 0.0);
    let offsets_kept = doc
        .layers()
        .iter()
        .all(|l| l.offset() == ninepatch_render::Offset::ORIGIN && l.is_visible());
    rp.compare_values(1.0, flag(offsets_kept), 0.0);
    rp.compare_values(
        1.0,
        flag(doc.layers().iter().all(|l| l.kind() != LayerKind::Border)),
        0.0,
    );
    // the same document still renders with a well-behaved analyzer
    rp.compare_values(
        1.0,
        flag(render_with(&mut doc, &LineScan).expect("render") == RenderOutcome::Rendered),
        0.0,
    );
    rp.compare_values(12.0, doc.width() as f64, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
