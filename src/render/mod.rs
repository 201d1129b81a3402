//! Rendering and export of label scenes.
//!
//! The layout engine and the sheet packer only talk to the two traits defined
//! here: [`Measure`] reports element boxes and label footprints, and
//! [`PageSurface`] receives finished pages. Concrete backends:
//!
//! - [`TextMeasurer`]: analytic measurement with monospaced font metrics
//! - [`svg`]: SVG documents for single labels
//! - [`raster`]: grayscale bitmaps (previews and scan checks)
//! - [`PdfSurface`]: multi-page PDF sheets
//! - [`winansi`]: the byte encoding of PDF text

mod measure;
mod pdf;
pub mod raster;
pub mod svg;
pub mod winansi;

pub use measure::{FontMetrics, TextMeasurer};
pub use pdf::PdfSurface;

use crate::error::PinlabelError;
use crate::geometry::{BBox, Coord, Mm, Page, Rotation, Transform};
use crate::scene::{ElementId, Scene};

/// Bounding box of one top-level scene element, in label millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasuredElement {
    pub id: ElementId,
    pub bbox: BBox<Mm>,
}

/// Measures rendered scenes.
pub trait Measure {
    /// Boxes of the barcode, dot and text group, in scene order.
    ///
    /// The background is the viewport and is not reported.
    fn measure(&self, scene: &Scene) -> Vec<MeasuredElement>;

    /// Width and height the label occupies on a page, in mm.
    fn footprint(&self, scene: &Scene) -> (f64, f64) {
        (scene.width(), scene.height())
    }
}

/// A gray level, 0 is black and 255 white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gray(pub u8);

impl Gray {
    pub const BLACK: Gray = Gray(0);
    pub const WHITE: Gray = Gray(255);
    /// Fill of the padding frame around each label (`#eeeeee`).
    pub const PADDING: Gray = Gray(0xee);

    /// Gray level as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 255.0
    }
}

/// Where a label goes on a page.
///
/// With [`Rotation::Deg0`] the label's bottom-left corner sits at `anchor`.
/// Rotations turn the label about `anchor`, so with [`Rotation::Deg180`]
/// `anchor` is its top-right corner (as printed on the back of the sheet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub anchor: Coord<Page>,
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(anchor: Coord<Page>, rotation: Rotation) -> Self {
        Self { anchor, rotation }
    }

    /// Matrix taking label millimeters (y down) to page millimeters (y up).
    pub fn transform(&self, label_height: f64) -> Transform {
        let flip = Transform {
            d: -1.0,
            f: label_height,
            ..Transform::identity()
        };
        Transform::translate(self.anchor.x, self.anchor.y)
            * Transform::rotate_about(self.rotation, 0.0, 0.0)
            * flip
    }

    /// Maps a label point onto the page.
    pub fn to_page(&self, p: Coord<Mm>, label_height: f64) -> Coord<Page> {
        let q = self.transform(label_height).apply(p);
        Coord::new(q.x, q.y)
    }

    /// Page area covered by a `width` x `height` label.
    pub fn footprint(&self, width: f64, height: f64) -> BBox<Page> {
        let corners = [
            Coord::new(0.0, 0.0),
            Coord::new(width, 0.0),
            Coord::new(width, height),
            Coord::new(0.0, height),
        ]
        .map(|p| self.to_page(p, height));
        BBox::from_points(corners).unwrap_or_default()
    }
}

/// A paginated output target.
pub trait PageSurface {
    /// Starts a new page of the given size in mm.
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), PinlabelError>;

    fn fill_rect(&mut self, rect: BBox<Page>, color: Gray) -> Result<(), PinlabelError>;

    fn draw_scene(&mut self, scene: &Scene, placement: Placement) -> Result<(), PinlabelError>;

    fn end_page(&mut self) -> Result<(), PinlabelError>;
}
