//! Analytic scene measurement.

use super::{Measure, MeasuredElement};
use crate::geometry::{BBox, Mm};
use crate::scene::{Element, Scene, TextAnchor, TextGroup, TextLine};

/// Metrics of a monospaced font, in em units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Horizontal advance of every glyph.
    pub advance: f64,
    /// Extent above the baseline.
    pub ascent: f64,
    /// Extent below the baseline.
    pub descent: f64,
}

impl FontMetrics {
    /// Inconsolata: half-em advance, boxes from 1 em above to 0.2 em below
    /// the baseline.
    pub const INCONSOLATA: FontMetrics = FontMetrics {
        advance: 0.5,
        ascent: 1.0,
        descent: 0.2,
    };

    /// Width of `text` set at `font_size` mm.
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.advance * font_size
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::INCONSOLATA
    }
}

/// Measures scenes from their geometry and fixed font metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMeasurer {
    pub metrics: FontMetrics,
}

impl TextMeasurer {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    /// Untransformed box of one line.
    pub fn line_bbox(&self, line: &TextLine, font_size: f64, anchor: TextAnchor) -> BBox<Mm> {
        let width = self.metrics.text_width(&line.content, font_size);
        let x0 = match anchor {
            TextAnchor::Start => line.x,
            TextAnchor::Middle => line.x - width / 2.0,
            TextAnchor::End => line.x - width,
        };
        BBox::from_xyxy(
            x0,
            line.y - self.metrics.ascent * font_size,
            x0 + width,
            line.y + self.metrics.descent * font_size,
        )
    }

    /// Union of the transformed line boxes.
    pub fn text_bbox(&self, group: &TextGroup) -> Option<BBox<Mm>> {
        group
            .lines
            .iter()
            .map(|line| {
                group
                    .transform
                    .apply_bbox(&self.line_bbox(line, group.font_size, group.anchor))
            })
            .reduce(|a, b| a.union(&b))
    }
}

impl Measure for TextMeasurer {
    fn measure(&self, scene: &Scene) -> Vec<MeasuredElement> {
        scene
            .elements()
            .iter()
            .filter_map(|element| {
                let bbox = match element {
                    Element::Background => return None,
                    Element::Barcode { transform, grid } => transform.apply_bbox(
                        &BBox::from_xyxy(0.0, 0.0, grid.width() as f64, grid.height() as f64),
                    ),
                    Element::Dot { center, radius } => BBox::from_xyxy(
                        center.x - radius,
                        center.y - radius,
                        center.x + radius,
                        center.y + radius,
                    ),
                    Element::Text(group) => self.text_bbox(group)?,
                };
                Some(MeasuredElement {
                    id: element.id(),
                    bbox,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Transform;

    fn line(x: f64, y: f64, content: &str) -> TextLine {
        TextLine {
            x,
            y,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_line_bbox_anchors() {
        let m = TextMeasurer::default();
        let l = line(10.0, 5.0, "abcd");
        assert_eq!(
            m.line_bbox(&l, 2.0, TextAnchor::Start),
            BBox::from_xyxy(10.0, 3.0, 14.0, 5.4)
        );
        assert_eq!(
            m.line_bbox(&l, 2.0, TextAnchor::Middle),
            BBox::from_xyxy(8.0, 3.0, 12.0, 5.4)
        );
        assert_eq!(
            m.line_bbox(&l, 2.0, TextAnchor::End),
            BBox::from_xyxy(6.0, 3.0, 10.0, 5.4)
        );
    }

    #[test]
    fn test_text_group_union_is_transformed() {
        let group = TextGroup {
            transform: Transform::translate(0.0, 1.0),
            font_size: 2.0,
            anchor: TextAnchor::Start,
            lines: vec![line(0.0, 2.0, "ab"), line(0.0, 5.0, "abcd")],
        };
        let bbox = TextMeasurer::default().text_bbox(&group).unwrap();
        assert_eq!(bbox, BBox::from_xyxy(0.0, 1.0, 4.0, 6.4));
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let metrics = FontMetrics::INCONSOLATA;
        assert_eq!(metrics.text_width("åäö", 2.0), 3.0);
    }
}
