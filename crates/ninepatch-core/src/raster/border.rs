//! Border operations for rasters
//!
//! This module provides functions for adding and removing borders
//! (padding) around images:
//!
//! - Uniform borders (same size on all sides)
//! - General borders (different size per side)

use super::{Raster, RasterData, RasterMut};
use crate::error::{Error, Result};

impl Raster {
    /// Add a uniform border around the image.
    ///
    /// Creates a new image with `npix` pixels of border on all sides,
    /// filled with the specified value.
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width + 2*npix, height + 2*npix)`.
    pub fn add_border(&self, npix: u32, val: u32) -> Result<Raster> {
        self.add_border_general(npix, npix, npix, npix, val)
    }

    /// Add a general border with different sizes per side.
    ///
    /// The source pixels are copied to `(left, top)` of the new image;
    /// resolution and input format are carried over.
    ///
    /// # Errors
    ///
    /// Returns error if dimensions would overflow.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<Raster> {
        let w = self.width();
        let h = self.height();
        let overflow = || Error::InvalidDimension {
            width: u32::MAX,
            height: u32::MAX,
        };
        let new_w = w
            .checked_add(left)
            .and_then(|v| v.checked_add(right))
            .ok_or_else(overflow)?;
        let new_h = h
            .checked_add(top)
            .and_then(|v| v.checked_add(bot))
            .ok_or_else(overflow)?;

        let mut out = RasterMut::new(new_w, new_h)?;
        if val != 0 {
            out.fill(val);
        }
        out.copy_resolution_from(self);
        out.set_informat(self.informat());

        for y in 0..h {
            let dst_start = left as usize;
            let dst = &mut out.row_data_mut(y + top)[dst_start..dst_start + w as usize];
            dst.copy_from_slice(self.row_data(y));
        }

        Ok(out.into())
    }

    /// Remove a uniform border from the image.
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width - 2*npix, height - 2*npix)`.
    pub fn remove_border(&self, npix: u32) -> Result<Raster> {
        self.remove_border_general(npix, npix, npix, npix)
    }

    /// Remove a general border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns error if the border is as large as or larger than the image.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Raster> {
        let w = self.width();
        let h = self.height();
        let horiz = left as u64 + right as u64;
        let vert = top as u64 + bot as u64;
        if horiz >= w as u64 || vert >= h as u64 {
            return Err(Error::InvalidParameter(format!(
                "border ({left},{right},{top},{bot}) too large for {w}x{h} image"
            )));
        }
        let new_w = w - left - right;
        let new_h = h - top - bot;

        let mut data = Vec::with_capacity(new_w as usize * new_h as usize);
        for y in top..top + new_h {
            let row = self.row_data(y);
            data.extend_from_slice(&row[left as usize..(left + new_w) as usize]);
        }
        let mut inner = RasterData::new(new_w, new_h)?;
        inner.data = data;
        inner.xres = self.xres();
        inner.yres = self.yres();
        inner.informat = self.informat();
        Ok(RasterMut { inner }.into())
    }
}
