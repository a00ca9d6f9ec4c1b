//! Image blending operations
//!
//! Porter-Duff "over" compositing of straight (non-premultiplied) RGBA
//! rasters. This is what flattening a layer stack uses: each layer is
//! blended over the accumulated result below it.
//!
//! Fully opaque and fully transparent sources take exact fast paths, so a
//! layer drawn over a transparent background reproduces its pixels
//! bit-for-bit.

use super::{Raster, RasterMut};
use crate::color;

/// Blend one straight-alpha pixel over another.
#[inline]
pub fn over(src: u32, dst: u32) -> u32 {
    let sa = color::alpha(src);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = color::alpha(dst);
    if da == 0 {
        return src;
    }

    let sa_f = sa as f32 / 255.0;
    let da_f = da as f32 / 255.0 * (1.0 - sa_f);
    let out_a = sa_f + da_f;
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa_f + d as f32 * da_f) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    let (sr, sg, sb, _) = color::extract_rgba(src);
    let (dr, dg, db, _) = color::extract_rgba(dst);
    color::compose_rgba(
        mix(sr, dr),
        mix(sg, dg),
        mix(sb, db),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

impl RasterMut {
    /// Blend `top` over this image with its upper-left corner at `(x, y)`.
    ///
    /// Parts of `top` outside this image are clipped.
    pub fn blend_over_in_place(&mut self, top: &Raster, x: i32, y: i32) {
        let dw = self.width() as i64;
        let dh = self.height() as i64;
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + top.width() as i64).min(dw);
        let y1 = (y as i64 + top.height() as i64).min(dh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for dy in y0..y1 {
            let sy = (dy - y as i64) as u32;
            let src_row = top.row_data(sy);
            let dst_row = self.row_data_mut(dy as u32);
            for dx in x0..x1 {
                let sx = (dx - x as i64) as usize;
                let d = &mut dst_row[dx as usize];
                *d = over(src_row[sx], *d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_fast_paths() {
        let red = color::compose_rgba(255, 0, 0, 255);
        let half_blue = color::compose_rgba(0, 0, 255, 128);
        assert_eq!(over(red, half_blue), red);
        assert_eq!(over(color::TRANSPARENT, half_blue), half_blue);
        assert_eq!(over(half_blue, color::TRANSPARENT), half_blue);
    }

    #[test]
    fn test_over_half_on_opaque() {
        let white = color::compose_rgba(255, 255, 255, 255);
        let half_black = color::compose_rgba(0, 0, 0, 128);
        let (r, g, b, a) = color::extract_rgba(over(half_black, white));
        assert_eq!(a, 255);
        assert!((126..=128).contains(&r));
        assert_eq!((r, r), (g, b));
    }

    #[test]
    fn test_blend_over_clips() {
        let mut base = RasterMut::new(4, 4).unwrap();
        base.fill(color::compose_rgba(10, 10, 10, 255));
        let base: Raster = base.into();

        let mut top = RasterMut::new(2, 2).unwrap();
        top.fill(color::compose_rgba(200, 0, 0, 255));
        let top: Raster = top.into();

        let mut out = base.to_mut();
        out.blend_over_in_place(&top, -1, 3);
        let out: Raster = out.into();
        assert_eq!(out.get_rgba(0, 3), Some((200, 0, 0, 255)));
        assert_eq!(out.get_rgba(1, 3), Some((10, 10, 10, 255)));
        assert_eq!(out.get_rgba(0, 2), Some((10, 10, 10, 255)));

        let mut untouched = base.to_mut();
        untouched.blend_over_in_place(&top, 10, 10);
        assert_eq!(Raster::from(untouched).data(), base.data());
    }
}
