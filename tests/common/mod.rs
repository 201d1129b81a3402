#![allow(dead_code)]

use image::{GrayImage, Luma};
use pinlabel::geometry::{BBox, Coord, Mm};
use pinlabel::label::Label;
use pinlabel::render::raster::pixels_per_mm;
use pinlabel::render::Measure;
use pinlabel::scene::Scene;
use pinlabel::styles::Style;

/// Builds consecutive labels of one style, starting at 1.
pub fn style_labels(style: Style, count: u64) -> Vec<Label> {
    (1..=count)
        .map(|number| style.label(number, None).expect("build preset label"))
        .collect()
}

/// Reads the barcode back from a raster by sampling each module center.
///
/// Returns `(width, height, dark)` in modules.
pub fn sample_barcode(label: &Label, dpi: u32) -> (usize, usize, Vec<bool>) {
    let image = label.to_image(dpi);
    let (transform, grid) = label.scene().barcode().expect("label has a barcode");
    let ppm = pixels_per_mm(dpi);

    let mut dark = Vec::with_capacity(grid.width() * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let center = transform.apply(Coord::<Mm>::new(x as f64 + 0.5, y as f64 + 0.5));
            let px = (center.x * ppm).floor() as u32;
            let py = (center.y * ppm).floor() as u32;
            dark.push(image.get_pixel(px, py).0[0] < 128);
        }
    }
    (grid.width(), grid.height(), dark)
}

/// Decodes the Data Matrix symbol printed on a rasterized label.
///
/// The barcode region is cut out and framed with a white quiet zone before
/// decoding, since labels may print the symbol flush with an edge.
pub fn decode_barcode(label: &Label, dpi: u32) -> Result<String, String> {
    let image = label.to_image(dpi);
    let (transform, grid) = label.scene().barcode().ok_or("label has no barcode")?;
    let region = transform.apply_bbox(&BBox::<Mm>::from_xyxy(
        0.0,
        0.0,
        grid.width() as f64,
        grid.height() as f64,
    ));
    let ppm = pixels_per_mm(dpi);
    let x0 = (region.xmin() * ppm).floor().max(0.0) as u32;
    let y0 = (region.ymin() * ppm).floor().max(0.0) as u32;
    let x1 = ((region.xmax() * ppm).ceil() as u32).min(image.width());
    let y1 = ((region.ymax() * ppm).ceil() as u32).min(image.height());

    let module_px = (x1 - x0) / grid.width() as u32;
    let pad = 4 * module_px.max(1);
    let mut framed = GrayImage::from_pixel(x1 - x0 + 2 * pad, y1 - y0 + 2 * pad, Luma([255]));
    for y in y0..y1 {
        for x in x0..x1 {
            framed.put_pixel(x - x0 + pad, y - y0 + pad, *image.get_pixel(x, y));
        }
    }

    let (width, height) = framed.dimensions();
    rxing::helpers::detect_in_luma(
        framed.into_raw(),
        width,
        height,
        Some(rxing::BarcodeFormat::DATA_MATRIX),
    )
    .map(|result| result.getText().to_string())
    .map_err(|err| err.to_string())
}

/// Measures every label as a fixed-size box.
pub struct FixedFootprint {
    pub width: f64,
    pub height: f64,
}

impl Measure for FixedFootprint {
    fn measure(&self, _scene: &Scene) -> Vec<pinlabel::render::MeasuredElement> {
        Vec::new()
    }

    fn footprint(&self, _scene: &Scene) -> (f64, f64) {
        (self.width, self.height)
    }
}
