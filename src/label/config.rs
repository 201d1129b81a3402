//! Label configuration: content, layout tags and their defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::datamatrix::SizeClass;
use crate::error::PinlabelError;
use crate::render::winansi;
use crate::scene::TextAnchor;

/// One of the nine anchor positions on a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::TopLeft,
        Alignment::TopCenter,
        Alignment::TopRight,
        Alignment::CenterLeft,
        Alignment::Center,
        Alignment::CenterRight,
        Alignment::BottomLeft,
        Alignment::BottomCenter,
        Alignment::BottomRight,
    ];

    /// Position along each axis as a fraction of the free space:
    /// 0 for left/top, 0.5 for center, 1 for right/bottom.
    pub fn fractions(self) -> (f64, f64) {
        let fx = match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => 0.0,
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => 0.5,
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => 1.0,
        };
        let fy = match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => 0.0,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => 0.5,
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => 1.0,
        };
        (fx, fy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::TopLeft => "top_left",
            Alignment::TopCenter => "top_center",
            Alignment::TopRight => "top_right",
            Alignment::CenterLeft => "center_left",
            Alignment::Center => "center",
            Alignment::CenterRight => "center_right",
            Alignment::BottomLeft => "bottom_left",
            Alignment::BottomCenter => "bottom_center",
            Alignment::BottomRight => "bottom_right",
        }
    }
}

impl FromStr for Alignment {
    type Err = PinlabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alignment::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Alignment::ALL.iter().map(|a| a.as_str()).collect();
                PinlabelError::Config(format!(
                    "alignment must be one of {}, got '{}'",
                    names.join(", "),
                    s
                ))
            })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which label edge the text baseline faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrientation {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl FromStr for TextOrientation {
    type Err = PinlabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(TextOrientation::Top),
            "right" => Ok(TextOrientation::Right),
            "bottom" => Ok(TextOrientation::Bottom),
            "left" => Ok(TextOrientation::Left),
            other => Err(PinlabelError::Config(format!(
                "text orientation must be either top, right, bottom, or left, got '{}'",
                other
            ))),
        }
    }
}

/// Horizontal alignment of the text lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    #[default]
    Right,
}

impl TextAlign {
    pub fn anchor(self) -> TextAnchor {
        match self {
            TextAlign::Left => TextAnchor::Start,
            TextAlign::Center => TextAnchor::Middle,
            TextAlign::Right => TextAnchor::End,
        }
    }
}

impl FromStr for TextAlign {
    type Err = PinlabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            other => Err(PinlabelError::Config(format!(
                "text align must be either left, center, or right, got '{}'",
                other
            ))),
        }
    }
}

/// Distances in mm from each label edge to the text area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every side.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }
}

/// A displacement in mm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Everything needed to lay out one label.
///
/// Use [`LabelConfig::new`] for the required fields and the `with_*` setters
/// for the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelConfig {
    /// Barcode payload.
    pub data: String,
    /// Label width in mm.
    pub width: f64,
    /// Label height in mm.
    pub height: f64,
    pub text_lines: Vec<String>,
    /// Font size in points.
    pub font_size: f64,
    pub text_orientation: TextOrientation,
    pub text_align: TextAlign,
    pub text_area_margins: Margins,
    /// Extra space between text lines in mm.
    pub text_line_spacing: f64,
    /// Baseline compensation as a fraction of the font size.
    pub baseline_shift: f64,
    /// Side length of the barcode in mm.
    pub datamatrix_length: f64,
    pub datamatrix_alignment: Alignment,
    pub datamatrix_offset: Offset,
    pub datamatrix_size: SizeClass,
    /// `None` leaves the pin dot out.
    pub dot_alignment: Option<Alignment>,
    pub dot_offset: Offset,
    pub dot_radius: f64,
    pub check_overlap: bool,
}

impl LabelConfig {
    pub fn new<S: Into<String>>(
        data: impl Into<String>,
        width: f64,
        height: f64,
        text_lines: impl IntoIterator<Item = S>,
        font_size: f64,
    ) -> Self {
        Self {
            data: data.into(),
            width,
            height,
            text_lines: text_lines.into_iter().map(Into::into).collect(),
            font_size,
            text_orientation: TextOrientation::Top,
            text_align: TextAlign::Right,
            text_area_margins: Margins::new(0.0, 5.0, 0.0, 1.3),
            text_line_spacing: 0.5,
            baseline_shift: 0.3,
            datamatrix_length: 5.0,
            datamatrix_alignment: Alignment::TopRight,
            datamatrix_offset: Offset::default(),
            datamatrix_size: SizeClass::SquareAuto,
            dot_alignment: Some(Alignment::CenterLeft),
            dot_offset: Offset::new(0.7, 0.0),
            dot_radius: 0.25,
            check_overlap: true,
        }
    }

    pub fn with_text_orientation(mut self, orientation: TextOrientation) -> Self {
        self.text_orientation = orientation;
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_text_area_margins(mut self, margins: Margins) -> Self {
        self.text_area_margins = margins;
        self
    }

    pub fn with_text_line_spacing(mut self, spacing: f64) -> Self {
        self.text_line_spacing = spacing;
        self
    }

    pub fn with_baseline_shift(mut self, shift: f64) -> Self {
        self.baseline_shift = shift;
        self
    }

    pub fn with_datamatrix_length(mut self, length: f64) -> Self {
        self.datamatrix_length = length;
        self
    }

    pub fn with_datamatrix_alignment(mut self, alignment: Alignment) -> Self {
        self.datamatrix_alignment = alignment;
        self
    }

    pub fn with_datamatrix_offset(mut self, offset: Offset) -> Self {
        self.datamatrix_offset = offset;
        self
    }

    pub fn with_datamatrix_size(mut self, size: SizeClass) -> Self {
        self.datamatrix_size = size;
        self
    }

    pub fn with_dot_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.dot_alignment = alignment;
        self
    }

    pub fn with_dot_offset(mut self, offset: Offset) -> Self {
        self.dot_offset = offset;
        self
    }

    pub fn with_dot_radius(mut self, radius: f64) -> Self {
        self.dot_radius = radius;
        self
    }

    pub fn with_check_overlap(mut self, check: bool) -> Self {
        self.check_overlap = check;
        self
    }

    /// Checks every numeric parameter before any layout happens.
    pub fn validate(&self) -> Result<(), PinlabelError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("font_size", self.font_size),
            ("datamatrix_length", self.datamatrix_length),
            ("dot_radius", self.dot_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PinlabelError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.text_lines.is_empty() {
            return Err(PinlabelError::Config(
                "text_lines must contain at least one line".to_string(),
            ));
        }
        for line in &self.text_lines {
            if let Err(c) = winansi::encode(line) {
                return Err(PinlabelError::Config(format!(
                    "text line {:?} contains {:?}, which the label font cannot print",
                    line, c
                )));
            }
        }
        if !self.text_area_margins.is_finite() {
            return Err(PinlabelError::Config(
                "text_area_margins must be finite".to_string(),
            ));
        }
        if !(self.datamatrix_offset.is_finite() && self.dot_offset.is_finite()) {
            return Err(PinlabelError::Config("offsets must be finite".to_string()));
        }
        if !(self.text_line_spacing.is_finite() && self.baseline_shift.is_finite()) {
            return Err(PinlabelError::Config(
                "text_line_spacing and baseline_shift must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_tags_roundtrip() {
        for alignment in Alignment::ALL {
            assert_eq!(alignment.as_str().parse::<Alignment>().unwrap(), alignment);
        }
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(PinlabelError::Config(_))
        ));
    }

    #[test]
    fn test_alignment_fractions() {
        assert_eq!(Alignment::TopRight.fractions(), (1.0, 0.0));
        assert_eq!(Alignment::Center.fractions(), (0.5, 0.5));
        assert_eq!(Alignment::BottomLeft.fractions(), (0.0, 1.0));
    }

    #[test]
    fn test_tags_deserialize_snake_case() {
        let a: Alignment = serde_json::from_str("\"center_left\"").unwrap();
        assert_eq!(a, Alignment::CenterLeft);
        let o: TextOrientation = serde_yaml::from_str("bottom").unwrap();
        assert_eq!(o, TextOrientation::Bottom);
    }

    #[test]
    fn test_invalid_tags() {
        assert!("up".parse::<TextOrientation>().is_err());
        assert!("justify".parse::<TextAlign>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = LabelConfig::new("000000001", 12.0, 5.0, ["NHMD", "1"], 3.55);
        assert_eq!(config.text_align, TextAlign::Right);
        assert_eq!(config.text_orientation, TextOrientation::Top);
        assert_eq!(config.text_area_margins, Margins::new(0.0, 5.0, 0.0, 1.3));
        assert_eq!(config.dot_alignment, Some(Alignment::CenterLeft));
        assert_eq!(config.dot_offset, Offset::new(0.7, 0.0));
        assert!(config.check_overlap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let base = LabelConfig::new("1", 12.0, 5.0, ["a"], 3.0);

        let mut bad = base.clone();
        bad.width = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.height = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.font_size = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.text_lines.clear();
        assert!(bad.validate().is_err());

        let bad = base.with_dot_offset(Offset::new(f64::INFINITY, 0.0));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_text_font_coverage() {
        let latin = LabelConfig::new("1", 14.0, 19.0, ["NHMA-ENT", "7", "Ødum"], 4.8);
        assert!(latin.validate().is_ok());

        let polish = LabelConfig::new("1", 14.0, 19.0, ["NHMA-ENT", "7", "Łódź"], 4.8);
        let err = polish.validate().unwrap_err();
        assert!(matches!(err, PinlabelError::Config(_)));
        assert!(err.to_string().contains("'Ł'"), "{err}");
    }
}
