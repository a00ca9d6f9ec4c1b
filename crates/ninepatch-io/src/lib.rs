//! ninepatch-io - Image I/O
//!
//! Reading and writing rasters. PNG is the only format a 9-patch can live
//! in, so it is the only codec; it is enabled by the default `png-format`
//! feature.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_extension};
pub use ninepatch_core::ImageFormat;

use ninepatch_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from memory
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Raster> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        _ => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!("{:?}", format)))
        }
    }
}

/// Write an image to a file path
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Write an image to memory
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(raster, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        _ => {
            let _ = (raster, writer);
            Err(IoError::UnsupportedFormat(format!("{:?}", format)))
        }
    }
}
