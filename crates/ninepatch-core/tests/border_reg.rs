//! Border and blending regression test
//!
//! Adds and removes borders and composites rasters with "over".

use ninepatch_core::raster::blend::over;
use ninepatch_core::{Raster, RasterMut, color};
use ninepatch_test::RegParams;

fn gradient(w: u32, h: u32) -> Raster {
    let mut m = RasterMut::new(w, h).expect("create");
    for y in 0..h {
        for x in 0..w {
            m.set_rgba(x, y, (x * 30) as u8, (y * 30) as u8, 90, 255)
                .expect("set");
        }
    }
    m.set_resolution(240, 240);
    m.into()
}

#[test]
fn border_reg() {
    let mut rp = RegParams::new("border");
    let src = gradient(6, 5);

    // --- Test 1: uniform 1-pixel transparent border ---
    let bordered = src.add_border(1, color::TRANSPARENT).expect("add_border");
    rp.compare_values(8.0, bordered.width() as f64, 0.0);
    rp.compare_values(7.0, bordered.height() as f64, 0.0);
    rp.compare_values(240.0, bordered.xres() as f64, 0.0);
    let ring_clear = (0..8).all(|x| {
        bordered.get_pixel(x, 0) == Some(0) && bordered.get_pixel(x, 6) == Some(0)
    }) && (0..7).all(|y| {
        bordered.get_pixel(0, y) == Some(0) && bordered.get_pixel(7, y) == Some(0)
    });
    rp.compare_values(1.0, if ring_clear { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(
        src.get_pixel(0, 0).unwrap_or(0) as f64,
        bordered.get_pixel(1, 1).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 2: removing the border restores the source ---
    let restored = bordered.remove_border(1).expect("remove_border");
    rp.compare_pix(&src, &restored);

    // --- Test 3: general borders ---
    let general = src
        .add_border_general(2, 0, 1, 3, color::OPAQUE_BLACK)
        .expect("add_border_general");
    rp.compare_values(8.0, general.width() as f64, 0.0);
    rp.compare_values(9.0, general.height() as f64, 0.0);
    rp.compare_values(
        color::OPAQUE_BLACK as f64,
        general.get_pixel(0, 8).unwrap_or(0) as f64,
        0.0,
    );
    let back = general
        .remove_border_general(2, 0, 1, 3)
        .expect("remove_border_general");
    rp.compare_pix(&src, &back);
    rp.compare_values(
        1.0,
        if src.remove_border_general(3, 3, 0, 0).is_err() { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 4: "over" compositing ---
    let red = color::compose_rgba(255, 0, 0, 255);
    let half_blue = color::compose_rgba(0, 0, 255, 128);
    rp.compare_values(red as f64, over(red, half_blue) as f64, 0.0);
    rp.compare_values(red as f64, over(color::TRANSPARENT, red) as f64, 0.0);
    let mixed = over(half_blue, red);
    rp.compare_values(255.0, color::alpha(mixed) as f64, 0.0);
    rp.compare_values(127.0, color::red(mixed) as f64, 1.0);
    rp.compare_values(128.0, color::blue(mixed) as f64, 1.0);

    // --- Test 5: blending a small raster with clipping ---
    let mut dot = RasterMut::new(2, 2).expect("dot");
    dot.fill(color::OPAQUE_BLACK);
    let dot: Raster = dot.into();
    let mut blended = src.to_mut();
    blended.blend_over_in_place(&dot, 5, -1);
    let blended: Raster = blended.into();
    rp.compare_values(
        color::OPAQUE_BLACK as f64,
        blended.get_pixel(5, 0).unwrap_or(0) as f64,
        0.0,
    );
    rp.compare_values(
        src.get_pixel(4, 0).unwrap_or(0) as f64,
        blended.get_pixel(4, 0).unwrap_or(0) as f64,
        0.0,
    );
    rp.compare_values(
        src.get_pixel(5, 1).unwrap_or(0) as f64,
        blended.get_pixel(5, 1).unwrap_or(0) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "border regression test failed");
}
