//! PNG image format support
//!
//! Every PNG is decoded to an 8-bit RGBA raster: palettes, low bit depths
//! and `tRNS` transparency are expanded, 16-bit samples are stripped to
//! 8 bits. Rasters are always written as 8-bit RGBA so 9-patch border
//! pixels keep their exact alpha.
//!
//! The `pHYs` chunk carries the image density. It is stored in pixels per
//! metre and converted to pixels per inch on the raster.

use crate::{IoError, IoResult};
use ninepatch_core::{ImageFormat, Raster, RasterMut, color};
use png::{BitDepth, ColorType, Decoder, Encoder, PixelDimensions, Transformations, Unit};
use std::io::{BufRead, Seek, Write};

const METRES_PER_INCH: f64 = 0.0254;

fn ppm_to_ppi(ppm: u32) -> u32 {
    (ppm as f64 * METRES_PER_INCH).round() as u32
}

fn ppi_to_ppm(ppi: u32) -> u32 {
    (ppi as f64 / METRES_PER_INCH).round() as u32
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let resolution = info.pixel_dims.as_ref().and_then(|dims| match dims.unit {
        Unit::Meter => Some((ppm_to_ppi(dims.xppu), ppm_to_ppi(dims.yppu))),
        _ => None,
    });

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if bytes_per_row < width as usize * samples || data.len() < bytes_per_row * height as usize {
        return Err(IoError::InvalidData(format!(
            "PNG frame too small for {}x{}",
            width, height
        )));
    }

    let mut raster = RasterMut::new(width, height)?;
    raster.set_informat(ImageFormat::Png);
    if let Some((xres, yres)) = resolution {
        raster.set_resolution(xres, yres);
    }

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let src = &data[row_start..row_start + width as usize * samples];
        let dst = raster.row_data_mut(y);
        for (px, chunk) in dst.iter_mut().zip(src.chunks_exact(samples)) {
            *px = match samples {
                1 => color::compose_rgb(chunk[0], chunk[0], chunk[0]),
                2 => color::compose_rgba(chunk[0], chunk[0], chunk[0], chunk[1]),
                3 => color::compose_rgb(chunk[0], chunk[1], chunk[2]),
                _ => color::compose_rgba(chunk[0], chunk[1], chunk[2], chunk[3]),
            };
        }
    }

    Ok(raster.into())
}

/// Write a PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    if raster.xres() > 0 && raster.yres() > 0 {
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: ppi_to_ppm(raster.xres()),
            yppu: ppi_to_ppm(raster.yres()),
            unit: Unit::Meter,
        }));
    }

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for &pixel in raster.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b, a]);
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
