//! Grayscale rasterization of label scenes.
//!
//! Draws the background, barcode modules and pin dot by sampling each pixel
//! center. Text is left out: glyph rendering needs a font rasterizer.

use image::{GrayImage, Luma};

use crate::geometry::{BBox, Coord, Mm};
use crate::scene::{Element, Scene};

/// Pixels per millimeter at the given resolution.
pub fn pixels_per_mm(dpi: u32) -> f64 {
    f64::from(dpi) / 25.4
}

/// Renders a scene at `dpi`; the image covers the whole label.
pub fn rasterize(scene: &Scene, dpi: u32) -> GrayImage {
    let ppm = pixels_per_mm(dpi);
    // tolerance keeps exact multiples from rounding up a pixel
    let width = (scene.width() * ppm - 1e-6).ceil().max(1.0) as u32;
    let height = (scene.height() * ppm - 1e-6).ceil().max(1.0) as u32;
    let mut image = GrayImage::from_pixel(width, height, Luma([255u8]));

    for element in scene.elements() {
        match element {
            Element::Background | Element::Text(_) => {}
            Element::Barcode { transform, grid } => {
                let Some(inverse) = transform.inverse() else {
                    log::warn!("skipping barcode with a singular transform");
                    continue;
                };
                let bbox = BBox::<Mm>::from_xyxy(
                    0.0,
                    0.0,
                    grid.width() as f64,
                    grid.height() as f64,
                );
                let area = transform.apply_bbox(&bbox);
                for_each_pixel_in(
                    &mut image,
                    ppm,
                    area.xmin(),
                    area.ymin(),
                    area.xmax(),
                    area.ymax(),
                    |p| {
                        let g = inverse.apply(p);
                        g.x >= 0.0
                            && g.y >= 0.0
                            && grid.is_dark(g.x.floor() as usize, g.y.floor() as usize)
                    },
                );
            }
            Element::Dot { center, radius } => {
                let r2 = radius * radius;
                for_each_pixel_in(
                    &mut image,
                    ppm,
                    center.x - radius,
                    center.y - radius,
                    center.x + radius,
                    center.y + radius,
                    |p| {
                        let (dx, dy) = (p.x - center.x, p.y - center.y);
                        dx * dx + dy * dy <= r2
                    },
                );
            }
        }
    }

    image
}

/// Paints black every pixel inside the mm box whose center passes `is_dark`.
fn for_each_pixel_in(
    image: &mut GrayImage,
    ppm: f64,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    is_dark: impl Fn(Coord<Mm>) -> bool,
) {
    let clamp_x = |v: f64| (v * ppm).floor().clamp(0.0, f64::from(image.width())) as u32;
    let clamp_y = |v: f64| (v * ppm).floor().clamp(0.0, f64::from(image.height())) as u32;
    let (x0, x1) = (clamp_x(xmin), clamp_x(xmax) + 1);
    let (y0, y1) = (clamp_y(ymin), clamp_y(ymax) + 1);

    for py in y0..y1.min(image.height()) {
        for px in x0..x1.min(image.width()) {
            let center = Coord::new((f64::from(px) + 0.5) / ppm, (f64::from(py) + 0.5) / ppm);
            if is_dark(center) {
                image.put_pixel(px, py, Luma([0u8]));
            }
        }
    }
}
