//! Renderer-independent description of one label.
//!
//! A [`Scene`] is an ordered list of drawable elements in label millimeters
//! (origin top-left, y down). The layout engine produces it; the SVG writer,
//! the rasterizer, the PDF surface and the measurer all consume it.

use std::fmt;

use crate::datamatrix::ModuleGrid;
use crate::geometry::{BBox, Coord, Mm, Transform};

/// Font family requested for label text.
pub const FONT_FAMILY: &str = "Inconsolata";

/// Font weight requested for label text.
pub const FONT_WEIGHT: &str = "800";

/// Stable identifier of a scene element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    Background,
    Datamatrix,
    PinDot,
    Text,
    /// One line inside the text group, numbered from 0.
    TextLine(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Background => write!(f, "background"),
            ElementId::Datamatrix => write!(f, "datamatrix"),
            ElementId::PinDot => write!(f, "pin_dot"),
            ElementId::Text => write!(f, "text"),
            ElementId::TextLine(i) => write!(f, "text_line_{}", i),
        }
    }
}

/// Horizontal text anchor, as in SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// One line of text positioned by its anchor point on the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub x: f64,
    pub y: f64,
    pub content: String,
}

/// The text block: lines sharing one transform, size and anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TextGroup {
    pub transform: Transform,
    /// Font size in millimeters.
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub lines: Vec<TextLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// White rectangle covering the whole label.
    Background,
    /// Barcode modules; module `(i, j)` occupies the unit square at `(i, j)`
    /// before `transform` is applied.
    Barcode {
        transform: Transform,
        grid: ModuleGrid,
    },
    Dot {
        center: Coord<Mm>,
        radius: f64,
    },
    Text(TextGroup),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Background => ElementId::Background,
            Element::Barcode { .. } => ElementId::Datamatrix,
            Element::Dot { .. } => ElementId::PinDot,
            Element::Text(_) => ElementId::Text,
        }
    }
}

/// An immutable, ordered set of label elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: f64,
    height: f64,
    elements: Vec<Element>,
}

impl Scene {
    pub(crate) fn new(width: f64, height: f64, elements: Vec<Element>) -> Self {
        Self {
            width,
            height,
            elements,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The label rectangle `[0, width] x [0, height]`.
    pub fn bounds(&self) -> BBox<Mm> {
        BBox::from_xyxy(0.0, 0.0, self.width, self.height)
    }

    /// Elements in drawing order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn barcode(&self) -> Option<(&Transform, &ModuleGrid)> {
        self.elements.iter().find_map(|e| match e {
            Element::Barcode { transform, grid } => Some((transform, grid)),
            _ => None,
        })
    }

    pub fn text(&self) -> Option<&TextGroup> {
        self.elements.iter().find_map(|e| match e {
            Element::Text(group) => Some(group),
            _ => None,
        })
    }
}
