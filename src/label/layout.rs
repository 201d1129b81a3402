//! Placement rules for the barcode, the pin dot and the text block.

use super::config::{Alignment, LabelConfig, Offset, TextOrientation};
use crate::datamatrix::{ModuleGrid, SymbolEncoder};
use crate::error::PinlabelError;
use crate::geometry::{Coord, Mm, Rotation, Transform, PT_TO_MM};
use crate::scene::{Element, ElementId, Scene, TextAnchor, TextGroup, TextLine};

/// Top-left corner of a `length` mm square barcode.
///
/// Fails when the barcode does not fit the smaller label side.
pub fn barcode_anchor(
    alignment: Alignment,
    offset: Offset,
    length: f64,
    width: f64,
    height: f64,
) -> Result<Coord<Mm>, PinlabelError> {
    if length > width.min(height) {
        return Err(PinlabelError::Config(format!(
            "datamatrix_length {} cannot be larger than width or height",
            length
        )));
    }
    let (fx, fy) = alignment.fractions();
    Ok(Coord::new(
        fx * (width - length) + offset.x,
        fy * (height - length) + offset.y,
    ))
}

/// Center of the pin dot; must stay on the label.
pub fn dot_anchor(
    alignment: Alignment,
    offset: Offset,
    width: f64,
    height: f64,
) -> Result<Coord<Mm>, PinlabelError> {
    let (fx, fy) = alignment.fractions();
    let x = fx * width + offset.x;
    let y = fy * height + offset.y;
    if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
        return Err(PinlabelError::Bounds {
            element: ElementId::PinDot,
            x,
            y,
            width,
            height,
        });
    }
    Ok(Coord::new(x, y))
}

/// Where the text block goes: shared line x, anchor and group transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPlacement {
    pub anchor: TextAnchor,
    pub x: f64,
    pub transform: Transform,
}

/// Computes the text block placement.
///
/// The block is rotated about `(x, top)` to face the requested edge and then
/// shifted so it lands inside the text area.
pub fn text_placement(config: &LabelConfig) -> TextPlacement {
    let m = config.text_area_margins;
    let aw = config.width - m.left - m.right;
    let ah = config.height - m.top - m.bottom;
    let anchor = config.text_align.anchor();

    let x = match anchor {
        TextAnchor::Start => m.left,
        TextAnchor::Middle => m.left + aw / 2.0,
        TextAnchor::End => config.width - m.right,
    };

    use TextAnchor::{End, Middle, Start};
    let (rotation, (dx, dy)) = match config.text_orientation {
        TextOrientation::Top => (Rotation::Deg0, (0.0, ah / 2.0)),
        TextOrientation::Right => (
            Rotation::Deg90,
            match anchor {
                Start => (aw / 2.0, 0.0),
                Middle => (0.0, ah / 2.0),
                End => (-aw / 2.0, ah),
            },
        ),
        TextOrientation::Bottom => (
            Rotation::Deg180,
            match anchor {
                Start => (aw, ah / 2.0),
                Middle => (0.0, ah / 2.0),
                End => (-aw, ah / 2.0),
            },
        ),
        TextOrientation::Left => (
            Rotation::Deg270,
            match anchor {
                Start => (aw / 2.0, ah),
                Middle => (0.0, ah / 2.0),
                End => (-aw / 2.0, 0.0),
            },
        ),
    };

    TextPlacement {
        anchor,
        x,
        transform: Transform::translate(dx, dy) * Transform::rotate_about(rotation, x, m.top),
    }
}

/// `n` evenly spaced values from `start` to `stop`, both included.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start; n];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
        .collect()
}

/// Text group for the configured lines, centered vertically on `top`.
fn text_group(config: &LabelConfig) -> TextGroup {
    let placement = text_placement(config);
    let font_size = config.font_size * PT_TO_MM;
    let n = config.text_lines.len();
    let total = (font_size + config.text_line_spacing) * n.saturating_sub(1) as f64;
    let shift = font_size * config.baseline_shift;

    let lines = linspace(-total / 2.0, total / 2.0, n)
        .into_iter()
        .zip(&config.text_lines)
        .map(|(offset, content)| TextLine {
            x: placement.x,
            y: config.text_area_margins.top + (offset + shift),
            content: content.clone(),
        })
        .collect();

    TextGroup {
        transform: placement.transform,
        font_size,
        anchor: placement.anchor,
        lines,
    }
}

pub(crate) fn build_scene(
    config: &LabelConfig,
    encoder: &dyn SymbolEncoder,
) -> Result<Scene, PinlabelError> {
    let (width, height) = (config.width, config.height);
    let mut elements = vec![Element::Background];

    let origin = barcode_anchor(
        config.datamatrix_alignment,
        config.datamatrix_offset,
        config.datamatrix_length,
        width,
        height,
    )?;
    let grid = ModuleGrid::encode_with(encoder, &config.data, config.datamatrix_size)?;
    let scale = config.datamatrix_length / grid.width() as f64;
    elements.push(Element::Barcode {
        transform: Transform::translate(origin.x, origin.y) * Transform::scale(scale, scale),
        grid,
    });

    if let Some(alignment) = config.dot_alignment {
        let center = dot_anchor(alignment, config.dot_offset, width, height)?;
        elements.push(Element::Dot {
            center,
            radius: config.dot_radius,
        });
    }

    elements.push(Element::Text(text_group(config)));

    Ok(Scene::new(width, height, elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Margins, TextAlign};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_barcode_top_right() {
        let anchor = barcode_anchor(Alignment::TopRight, Offset::default(), 5.0, 12.0, 5.0).unwrap();
        assert_eq!(anchor, Coord::new(7.0, 0.0));
    }

    #[test]
    fn test_barcode_center_with_offset() {
        let anchor =
            barcode_anchor(Alignment::Center, Offset::new(0.5, -0.5), 4.0, 12.0, 6.0).unwrap();
        assert_eq!(anchor, Coord::new(4.5, 0.5));
    }

    #[test]
    fn test_barcode_too_long() {
        assert!(barcode_anchor(Alignment::TopLeft, Offset::default(), 5.0, 5.0, 5.0).is_ok());
        assert!(matches!(
            barcode_anchor(Alignment::TopLeft, Offset::default(), 5.1, 12.0, 5.0),
            Err(PinlabelError::Config(_))
        ));
    }

    #[test]
    fn test_dot_anchor_positions() {
        let center = dot_anchor(Alignment::CenterLeft, Offset::new(0.7, 0.0), 12.0, 5.0).unwrap();
        assert_eq!(center, Coord::new(0.7, 2.5));
        let corner = dot_anchor(Alignment::BottomRight, Offset::default(), 12.0, 5.0).unwrap();
        assert_eq!(corner, Coord::new(12.0, 5.0));
    }

    #[test]
    fn test_dot_outside_label() {
        let err = dot_anchor(Alignment::CenterLeft, Offset::new(-0.1, 0.0), 12.0, 5.0).unwrap_err();
        assert!(matches!(
            err,
            PinlabelError::Bounds {
                element: ElementId::PinDot,
                ..
            }
        ));
        assert!(dot_anchor(Alignment::TopCenter, Offset::new(0.0, 5.5), 12.0, 5.0).is_err());
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(-1.0, 1.0, 3), vec![-1.0, 0.0, 1.0]);
        assert_eq!(linspace(0.0, 0.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_top_text_placement() {
        let config = LabelConfig::new("1", 12.0, 5.0, ["NHMD", "1"], 3.55);
        let placement = text_placement(&config);
        assert_eq!(placement.anchor, TextAnchor::End);
        assert_eq!(placement.x, 7.0);
        assert_eq!(placement.transform, Transform::translate(0.0, 2.5));
    }

    #[test]
    fn test_right_text_placement_middle() {
        let config = LabelConfig::new("1", 14.0, 19.0, ["NHMA-ENT", "1"], 7.0)
            .with_text_orientation(TextOrientation::Right)
            .with_text_align(TextAlign::Center)
            .with_text_area_margins(Margins::new(0.0, 0.5, 0.0, 6.5));
        let placement = text_placement(&config);
        assert!(close(placement.x, 10.0));
        // rotate 90 about (10, 0), then move down half the text area
        let p = placement.transform.apply(Coord::<Mm>::new(10.0, 0.0));
        assert!(close(p.x, 10.0) && close(p.y, 9.5));
        let q = placement.transform.apply(Coord::<Mm>::new(11.0, 0.0));
        assert!(close(q.x, 10.0) && close(q.y, 10.5));
    }

    #[test]
    fn test_every_orientation_keeps_anchor_in_area() {
        for orientation in [
            TextOrientation::Top,
            TextOrientation::Right,
            TextOrientation::Bottom,
            TextOrientation::Left,
        ] {
            for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
                let config = LabelConfig::new("1", 20.0, 20.0, ["x"], 3.0)
                    .with_text_orientation(orientation)
                    .with_text_align(align)
                    .with_text_area_margins(Margins::uniform(2.0));
                let placement = text_placement(&config);
                let p = placement.transform.apply(Coord::<Mm>::new(placement.x, 2.0));
                assert!(
                    (2.0 - 1e-9..=18.0 + 1e-9).contains(&p.x)
                        && (2.0 - 1e-9..=18.0 + 1e-9).contains(&p.y),
                    "{orientation:?}/{align:?} put the anchor at {p:?}"
                );
            }
        }
    }

    #[test]
    fn test_line_positions() {
        let config = LabelConfig::new("1", 12.0, 5.0, ["a", "b", "c"], 10.0)
            .with_text_line_spacing(1.0)
            .with_baseline_shift(0.0);
        let group = text_group(&config);
        let fs = 10.0 * PT_TO_MM;
        let ys: Vec<f64> = group.lines.iter().map(|l| l.y).collect();
        assert!(close(ys[0], -(fs + 1.0)));
        assert!(close(ys[1], 0.0));
        assert!(close(ys[2], fs + 1.0));
        assert!(close(group.font_size, fs));
    }

    #[test]
    fn test_single_line_sits_on_shifted_baseline() {
        let config = LabelConfig::new("1", 12.0, 5.0, ["only"], 3.55)
            .with_text_area_margins(Margins::new(1.0, 5.0, 0.0, 1.3));
        let group = text_group(&config);
        assert_eq!(group.lines.len(), 1);
        assert!(close(group.lines[0].y, 1.0 + 0.3 * 3.55 * PT_TO_MM));
    }
}
