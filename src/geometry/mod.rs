//! Geometry primitives shared by the label layout engine and the sheet packer.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Marker types keep label-local millimeters ([`Mm`],
//!    y down) apart from page millimeters ([`Page`], y up).
//!
//! 2. **Exact quarter turns**: Text blocks and back-side labels only ever
//!    rotate by multiples of 90°, so [`Rotation`] uses exact sine/cosine
//!    tables instead of trigonometry.
//!
//! # Example
//!
//! ```
//! use pinlabel::geometry::{BBox, Coord, Mm, Transform};
//!
//! let barcode = Transform::translate(7.0, 0.0) * Transform::scale(0.5, 0.5);
//! let grid: BBox<Mm> = BBox::from_xyxy(0.0, 0.0, 10.0, 10.0);
//! assert_eq!(barcode.apply_bbox(&grid), BBox::from_xyxy(7.0, 0.0, 12.0, 5.0));
//! assert_eq!(barcode.apply(Coord::<Mm>::new(0.0, 0.0)), Coord::new(7.0, 0.0));
//! ```

mod bbox;
mod coord;
mod space;
mod transform;

pub use bbox::BBox;
pub use coord::Coord;
pub use space::{Mm, Page};
pub use transform::{Rotation, Transform};

/// Millimeters per typographic point (1pt = 0.352778mm).
pub const PT_TO_MM: f64 = 0.352778;

/// PDF user-space points per millimeter.
pub const MM_TO_PT: f64 = 72.0 / 25.4;
