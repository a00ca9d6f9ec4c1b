//! Raster - The main image container
//!
//! The `Raster` structure is the image type used by every stage of the
//! 9-patch pipeline. Every pixel is a 32-bit RGBA sample.
//!
//! # Pixel layout
//!
//! - One `u32` per pixel, rows stored top to bottom without padding
//! - Color order is RGBA (red in MSB, alpha in LSB)
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;
pub mod blend;
mod border;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format (raster created in memory)
    #[default]
    Unknown,
    /// PNG format
    Png,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
        }
    }
}

/// Internal raster data
#[derive(Debug, Clone)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// X resolution (ppi), 0 if unknown
    xres: u32,
    /// Y resolution (ppi), 0 if unknown
    yres: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data, one RGBA word per pixel
    data: Vec<u32>,
}

impl RasterData {
    fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(RasterData {
            width,
            height,
            xres: 0,
            yres: 0,
            informat: ImageFormat::Unknown,
            data: vec![0u32; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Raster - RGBA image container
///
/// `Raster` uses reference counting via `Arc` for cheap cloning.
///
/// # Examples
///
/// ```
/// use ninepatch_core::Raster;
///
/// let raster = Raster::new(64, 48).unwrap();
/// assert_eq!(raster.width(), 64);
/// assert_eq!(raster.height(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new fully transparent raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::new(width, height)?),
        })
    }

    /// Create a raster from packed RGBA words in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let mut inner = RasterData::new(width, height)?;
        if data.len() != inner.data.len() {
            return Err(Error::InvalidParameter(format!(
                "expected {} pixels for {}x{}, got {}",
                inner.data.len(),
                width,
                height,
                data.len()
            )));
        }
        inner.data = data;
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> u32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> u32 {
        self.inner.yres
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the pixels of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }


    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Write image metadata to a writer (for debugging).
    pub fn print_info(&self, writer: &mut impl std::io::Write, label: Option<&str>) -> Result<()> {
        if let Some(text) = label {
            writeln!(writer, "  Raster Info for {text}:")?;
        }
        writeln!(
            writer,
            "    width = {}, height = {}",
            self.inner.width, self.inner.height
        )?;
        writeln!(
            writer,
            "    xres = {}, yres = {}",
            self.inner.xres, self.inner.yres
        )?;
        writeln!(writer, "    input format: {}", self.inner.informat.extension())?;
        Ok(())
    }

    /// Create a deep copy of this raster.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(self.inner.as_ref().clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: self.inner.as_ref().clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a new fully transparent mutable raster.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(RasterMut {
            inner: RasterData::new(width, height)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> u32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> u32 {
        self.inner.yres
    }

    /// Set both resolutions.
    pub fn set_resolution(&mut self, xres: u32, yres: u32) {
        self.inner.xres = xres;
        self.inner.yres = yres;
    }

    /// Copy resolution (xres, yres) from another raster.
    pub fn copy_resolution_from(&mut self, src: &Raster) {
        self.inner.xres = src.inner.xres;
        self.inner.yres = src.inner.yres;
    }

    /// Set the input format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = self.inner.index(0, y);
        let end = start + self.inner.width as usize;
        &mut self.inner.data[start..end]
    }

    /// Set every pixel to `val`.
    pub fn fill(&mut self, val: u32) {
        self.inner.data.fill(val);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
