//! Command-line interface
//!
//! - `render`: one 9-patch at the source resolution
//! - `export`: one file per density bucket under `<project>/res`
//! - `inspect`: print the border of an existing 9-patch

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ninepatch::io::{ImageFormat, read_image, write_image};
use ninepatch::render::{Compositor, LineActivitySet, OverCompositor, is_well_formed};
use ninepatch::{
    AnalyzerStrategy, Density, ExportConfig, ExportContext, Image, LayerKind, MaskRole, Offset,
    RenderOptions, RenderOutcome, ScaleMethod, decode, render, save_resolutions,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ninepatch",
    about = "Render Android 9-patch images from region masks",
    arg_required_else_help = true,
    version
)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single 9-patch PNG at the source resolution
    Render(RenderArgs),
    /// Export the image for each Android density bucket
    Export(ExportArgs),
    /// Print the border encoded in a 9-patch PNG
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Filter {
    /// Catmull-Rom cubic
    Cubic,
    /// Bilinear
    Linear,
    /// Nearest neighbor
    Nearest,
}

impl From<Filter> for ScaleMethod {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Cubic => ScaleMethod::Cubic,
            Filter::Linear => ScaleMethod::Linear,
            Filter::Nearest => ScaleMethod::Sampling,
        }
    }
}

#[derive(Args)]
struct RenderFlags {
    /// Resampling filter used when scaling to a density
    #[arg(long, value_enum, default_value_t = Filter::Cubic)]
    filter: Filter,

    /// Mark one bounding box per mask instead of every touched line
    #[arg(long)]
    bounding_box: bool,
}

impl RenderFlags {
    fn options(&self) -> RenderOptions {
        let strategy = if self.bounding_box {
            AnalyzerStrategy::BoundingBox
        } else {
            AnalyzerStrategy::LineScan
        };
        RenderOptions::default()
            .with_strategy(strategy)
            .with_scale_method(self.filter.into())
    }
}

#[derive(Args)]
struct RenderArgs {
    /// Artwork PNG
    #[arg(long)]
    image: PathBuf,
    /// Stretch mask PNG (left and top edges)
    #[arg(long)]
    stretch: PathBuf,
    /// Content mask PNG (right and bottom edges)
    #[arg(long)]
    content: PathBuf,
    /// Output PNG
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    flags: RenderFlags,
}

#[derive(Args)]
struct ExportArgs {
    /// Artwork PNG
    #[arg(long)]
    image: PathBuf,
    /// Stretch mask PNG; without masks plain PNGs are exported
    #[arg(long, requires = "content")]
    stretch: Option<PathBuf>,
    /// Content mask PNG
    #[arg(long, requires = "stretch")]
    content: Option<PathBuf>,
    /// Android project root; files go to <project>/res/drawable-<bucket>
    #[arg(long)]
    project: PathBuf,
    /// Resolution of the artwork (default: from the PNG, else 160)
    #[arg(long)]
    source_dpi: Option<u32>,
    /// Also export ldpi
    #[arg(long)]
    ldpi: bool,
    /// Extra density bucket (repeatable), e.g. xxhdpi
    #[arg(long = "density", value_parser = parse_density)]
    densities: Vec<Density>,
    #[command(flatten)]
    flags: RenderFlags,
}

#[derive(Args)]
struct InspectArgs {
    /// 9-patch PNG
    image: PathBuf,
}

fn parse_density(name: &str) -> Result<Density, String> {
    Density::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Density::ALL.iter().map(|d| d.name()).collect();
        format!("unknown density '{name}' (expected one of {})", known.join(", "))
    })
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Export(args) => run_export(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

/// Artwork plus optional masks as a layered document
fn load_document(image: &Path, masks: Option<(&Path, &Path)>) -> Result<Image> {
    let mut doc =
        Image::open(image).with_context(|| format!("failed to read {}", image.display()))?;
    if let Some((stretch, content)) = masks {
        for (role, path) in [(MaskRole::Stretch, stretch), (MaskRole::Content, content)] {
            let raster = read_image(path)
                .with_context(|| format!("failed to read mask {}", path.display()))?;
            if (raster.width(), raster.height()) != (doc.width(), doc.height()) {
                bail!(
                    "mask {} is {}x{} but {} is {}x{}",
                    path.display(),
                    raster.width(),
                    raster.height(),
                    image.display(),
                    doc.width(),
                    doc.height()
                );
            }
            doc.add_layer(role.layer_name(), LayerKind::Mask(role), raster, Offset::ORIGIN);
        }
    }
    Ok(doc)
}

fn run_render(args: RenderArgs) -> Result<()> {
    let mut doc = load_document(&args.image, Some((&args.stretch, &args.content)))?;
    let outcome = render(&mut doc, &args.flags.options())?;
    if outcome != RenderOutcome::Rendered {
        bail!("{} was not rendered: {:?}", args.image.display(), outcome);
    }
    let flat = OverCompositor.flatten(&doc)?;
    write_image(&flat, &args.out, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("{} ({}x{})", args.out.display(), flat.width(), flat.height());
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let masks = match (&args.stretch, &args.content) {
        (Some(s), Some(c)) => Some((s.as_path(), c.as_path())),
        _ => None,
    };
    let doc = load_document(&args.image, masks)?;

    let mut config = ExportConfig::default()
        .with_ldpi(args.ldpi)
        .with_render(args.flags.options());
    if let Some(dpi) = args.source_dpi {
        config = config.with_source_dpi(dpi);
    }
    for density in args.densities {
        config = config.with_density(density);
    }

    let report = save_resolutions(&ExportContext::default(), &doc, &args.project, &config)?;
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("{:>8}  {}", outcome.target.name(), path.display()),
            Err(e) => eprintln!("{:>8}  failed: {}", outcome.target.name(), e),
        }
    }
    if !report.is_success() {
        bail!(
            "{} of {} targets failed",
            report.failures().len(),
            report.outcomes.len()
        );
    }
    Ok(())
}

/// Runs as `1-3, 7` with 1-based inclusive line numbers inside the
/// artwork, or `none`
fn format_runs(set: &LineActivitySet) -> String {
    let runs: Vec<String> = set
        .runs()
        .iter()
        .map(|r| {
            if r.end - r.start == 1 {
                format!("{}", r.start + 1)
            } else {
                format!("{}-{}", r.start + 1, r.end)
            }
        })
        .collect();
    if runs.is_empty() {
        "none".to_string()
    } else {
        runs.join(", ")
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let raster = read_image(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let spec = decode(&raster)?;

    let mut out = std::io::stdout().lock();
    raster.print_info(&mut out, Some(&args.image.display().to_string()))?;
    writeln!(out, "    well formed: {}", is_well_formed(&raster))?;
    writeln!(out, "    stretch rows:    {}", format_runs(spec.left()))?;
    writeln!(out, "    stretch columns: {}", format_runs(spec.top()))?;
    writeln!(out, "    content rows:    {}", format_runs(spec.right()))?;
    writeln!(out, "    content columns: {}", format_runs(spec.bottom()))?;
    Ok(())
}
