//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between the label's own drawing space and the printed page at compile time.
//! Both spaces are measured in millimeters; they differ in origin and in the
//! direction of the y axis.

use std::fmt;

/// Marker type for label coordinates.
///
/// The origin is the label's top-left corner, x grows to the right and y grows
/// downwards, matching the way the label scene is described.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mm {}

/// Marker type for page coordinates.
///
/// The origin is the page's bottom-left corner and y grows upwards, matching
/// the way printed pages are addressed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {}

impl fmt::Debug for Mm {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
