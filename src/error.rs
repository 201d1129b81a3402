use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::{BBox, Mm};
use crate::scene::ElementId;

/// The main error type for pinlabel operations.
#[derive(Debug, Error)]
pub enum PinlabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter has an invalid value (non-positive size, unknown tag, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A position derived from alignment and offset falls outside the label.
    #[error("{element} at ({x}, {y}) is outside of the label (0, 0, {width}, {height})")]
    Bounds {
        element: ElementId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("Objects {first} and {second} are overlapping by {depth}mm")]
    Overlap {
        first: ElementId,
        second: ElementId,
        depth: f64,
    },

    #[error("Object {element} {bbox} is outside of the label")]
    OutOfBounds { element: ElementId, bbox: BBox<Mm> },

    #[error("Text object {element} {bbox} is outside of the text area")]
    TextOutOfArea { element: ElementId, bbox: BBox<Mm> },

    #[error("Payload of {len} byte(s) does not fit a {size} Data Matrix symbol")]
    Capacity { size: String, len: usize },

    /// A page surface was driven out of order (drawing outside a page, ...).
    #[error("Page surface error: {0}")]
    Surface(String),

    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to write PDF to {path}: {source}")]
    PdfWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse sheet config from {path}: {message}")]
    SheetConfigParse { path: PathBuf, message: String },

    #[error("Invalid label numbers: {0}")]
    InvalidNumbers(#[from] crate::numbers::NumberRangeError),
}
