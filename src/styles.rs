//! Label style presets for the collections the labels are printed for.

use clap::ValueEnum;

use crate::error::PinlabelError;
use crate::label::{Alignment, Label, LabelConfig, Margins, Offset, TextAlign, TextOrientation};

/// Font size used when NHMA labels carry a third text line.
const NHMA_BOTTOM_TEXT_FONT_SIZE: f64 = 4.8;

/// A predefined label layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Style {
    /// 12x5 mm pin label with the barcode on the right.
    #[value(name = "NHMD")]
    Nhmd,
    /// 14x19 mm entomology label with sideways text.
    #[value(name = "NHMA")]
    Nhma,
}

impl Style {
    /// Whether the style prints the optional bottom text line.
    pub fn supports_bottom_text(self) -> bool {
        matches!(self, Style::Nhma)
    }

    /// The label configuration for `number`.
    ///
    /// NHMA prints a non-empty `bottom_text` as a third line and shrinks the
    /// font to fit it. The third line is an addition to the NHMA layout,
    /// which otherwise carries only the prefix and the number.
    pub fn config(self, number: u64, bottom_text: Option<&str>) -> LabelConfig {
        let data = format!("{:09}", number);
        match self {
            Style::Nhmd => LabelConfig::new(
                data,
                12.0,
                5.0,
                ["NHMD".to_string(), number.to_string()],
                3.55,
            )
            .with_text_align(TextAlign::Right)
            .with_text_area_margins(Margins::new(0.0, 5.0, 0.0, 1.3))
            .with_text_orientation(TextOrientation::Top)
            .with_dot_alignment(Some(Alignment::CenterLeft))
            .with_dot_offset(Offset::new(0.7, 0.0))
            .with_datamatrix_alignment(Alignment::TopRight)
            .with_datamatrix_length(5.0),
            Style::Nhma => {
                let mut lines = vec!["NHMA-ENT".to_string(), number.to_string()];
                let mut font_size = 7.0;
                if let Some(text) = bottom_text.filter(|t| !t.is_empty()) {
                    lines.push(text.to_string());
                    font_size = NHMA_BOTTOM_TEXT_FONT_SIZE;
                }
                LabelConfig::new(data, 14.0, 19.0, lines, font_size)
                    .with_text_align(TextAlign::Center)
                    .with_text_area_margins(Margins::new(0.0, 0.5, 0.0, 6.5))
                    .with_text_orientation(TextOrientation::Right)
                    .with_dot_alignment(Some(Alignment::CenterLeft))
                    .with_dot_offset(Offset::new(0.2 * 14.0, 0.0))
                    .with_datamatrix_alignment(Alignment::BottomLeft)
                    .with_datamatrix_length(6.5)
            }
        }
    }

    /// Builds the label for `number`.
    pub fn label(self, number: u64, bottom_text: Option<&str>) -> Result<Label, PinlabelError> {
        Label::new(self.config(number, bottom_text))
    }
}
