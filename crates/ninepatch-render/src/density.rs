//! Android density buckets and export targets

use crate::error::{RenderError, RenderResult};
use crate::render::RenderOptions;
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolution assumed for images that do not record one (the mdpi baseline)
pub const DEFAULT_SOURCE_DPI: u32 = 160;

/// Standard Android screen density bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub const ALL: [Density; 6] = [
        Density::Ldpi,
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Dots per inch of the bucket
    pub fn dpi(self) -> u32 {
        match self {
            Density::Ldpi => 120,
            Density::Mdpi => 160,
            Density::Hdpi => 240,
            Density::Xhdpi => 320,
            Density::Xxhdpi => 480,
            Density::Xxxhdpi => 640,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Density::Ldpi => "ldpi",
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Resource directory name, e.g. `drawable-hdpi`
    pub fn resource_dir(self) -> String {
        format!("drawable-{}", self.name())
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One output of an export: a name, a scale factor and a directory
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTarget {
    name: String,
    scale: f64,
    directory: PathBuf,
}

impl DensityTarget {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidDensity`] unless `scale` is finite and
    /// positive.
    pub fn new(
        name: impl Into<String>,
        scale: f64,
        directory: impl Into<PathBuf>,
    ) -> RenderResult<Self> {
        let name = name.into();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidDensity(format!(
                "{name}: scale factor {scale} must be finite and positive"
            )));
        }
        Ok(Self {
            name,
            scale,
            directory: directory.into(),
        })
    }

    /// Target for a standard bucket under `<project_root>/res`.
    ///
    /// The scale factor is `density.dpi() / source_dpi`.
    pub fn for_density(
        density: Density,
        source_dpi: u32,
        project_root: &Path,
    ) -> RenderResult<Self> {
        if source_dpi == 0 {
            return Err(RenderError::InvalidDensity(format!(
                "{density}: source resolution must be positive"
            )));
        }
        Self::new(
            density.name(),
            density.dpi() as f64 / source_dpi as f64,
            project_root.join("res").join(density.resource_dir()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Configuration for [`save_resolutions`](crate::save_resolutions)
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Resolution of the source artwork; taken from the image when `None`
    pub source_dpi: Option<u32>,
    /// Buckets to export
    pub densities: Vec<Density>,
    /// Also export ldpi
    pub include_ldpi: bool,
    pub render: RenderOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source_dpi: None,
            densities: vec![Density::Mdpi, Density::Hdpi, Density::Xhdpi],
            include_ldpi: false,
            render: RenderOptions::default(),
        }
    }
}

impl ExportConfig {
    pub fn with_source_dpi(mut self, dpi: u32) -> Self {
        self.source_dpi = Some(dpi);
        self
    }

    pub fn with_ldpi(mut self, include: bool) -> Self {
        self.include_ldpi = include;
        self
    }

    /// Add an extra bucket; duplicates are ignored.
    pub fn with_density(mut self, density: Density) -> Self {
        if !self.densities.contains(&density) {
            self.densities.push(density);
        }
        self
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Buckets to export, lowest density first
    pub fn buckets(&self) -> Vec<Density> {
        let mut buckets = self.densities.clone();
        if self.include_ldpi {
            buckets.push(Density::Ldpi);
        }
        buckets.sort();
        buckets.dedup();
        buckets
    }

    /// Source resolution to scale from.
    ///
    /// An explicit setting wins, then the image resolution, then
    /// [`DEFAULT_SOURCE_DPI`].
    pub fn resolve_source_dpi(&self, image_dpi: u32) -> u32 {
        match self.source_dpi {
            Some(dpi) => dpi,
            None if image_dpi > 0 => image_dpi,
            None => DEFAULT_SOURCE_DPI,
        }
    }

    /// Targets under `<project_root>/res` for an image of `image_dpi`.
    pub fn targets(&self, image_dpi: u32, project_root: &Path) -> RenderResult<Vec<DensityTarget>> {
        let dpi = self.resolve_source_dpi(image_dpi);
        self.buckets()
            .into_iter()
            .map(|d| DensityTarget::for_density(d, dpi, project_root))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_table() {
        let dpis: Vec<u32> = Density::ALL.iter().map(|d| d.dpi()).collect();
        assert_eq!(dpis, vec![120, 160, 240, 320, 480, 640]);
        assert_eq!(Density::Xxhdpi.resource_dir(), "drawable-xxhdpi");
        assert_eq!(Density::from_name("HDPI"), Some(Density::Hdpi));
        assert_eq!(Density::from_name("tvdpi"), None);
    }

    #[test]
    fn test_target_validation() {
        assert!(DensityTarget::new("x", 0.0, "out").is_err());
        assert!(DensityTarget::new("x", -1.5, "out").is_err());
        assert!(DensityTarget::new("x", f64::NAN, "out").is_err());
        assert!(DensityTarget::new("x", f64::INFINITY, "out").is_err());
        let t = DensityTarget::new("x", 0.75, "out").unwrap();
        assert_eq!(t.scale(), 0.75);
        assert!(DensityTarget::for_density(Density::Mdpi, 0, Path::new("p")).is_err());
    }

    #[test]
    fn test_default_targets() {
        let config = ExportConfig::default();
        let targets = config.targets(0, Path::new("/proj")).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["mdpi", "hdpi", "xhdpi"]);
        assert_eq!(targets[0].scale(), 1.0);
        assert_eq!(targets[1].scale(), 1.5);
        assert_eq!(targets[2].scale(), 2.0);
        assert_eq!(
            targets[1].directory(),
            Path::new("/proj/res/drawable-hdpi")
        );
    }

    #[test]
    fn test_source_dpi_resolution() {
        let config = ExportConfig::default();
        assert_eq!(config.resolve_source_dpi(0), 160);
        assert_eq!(config.resolve_source_dpi(320), 320);
        assert_eq!(config.clone().with_source_dpi(240).resolve_source_dpi(320), 240);

        let targets = config.targets(320, Path::new("p")).unwrap();
        assert_eq!(targets[0].scale(), 0.5);
    }

    #[test]
    fn test_ldpi_and_extra_buckets() {
        let config = ExportConfig::default()
            .with_ldpi(true)
            .with_density(Density::Xxhdpi)
            .with_density(Density::Hdpi);
        assert_eq!(
            config.buckets(),
            vec![
                Density::Ldpi,
                Density::Mdpi,
                Density::Hdpi,
                Density::Xhdpi,
                Density::Xxhdpi
            ]
        );
        let targets = config.targets(160, Path::new("p")).unwrap();
        assert_eq!(targets[0].scale(), 0.75);
    }
}
