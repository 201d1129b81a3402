//! Layout validation for labels.
//!
//! Checks the measured element boxes of a scene for:
//! - elements extending past the label edge
//! - pairs of elements overlapping each other
//! - the text block leaving its margin-reduced text area
//!
//! Checks run element by element in scene order, so the first issue in the
//! report is the first problem a reader of the label would hit.

mod report;

pub use report::{IssueCode, IssueContext, ValidationIssue, ValidationReport};

use crate::geometry::{BBox, Mm};
use crate::render::MeasuredElement;
use crate::scene::{ElementId, Scene};

/// Slack allowed on containment checks for floating-point noise, in mm.
pub const CONTAINMENT_TOLERANCE: f64 = 1e-9;

/// Validates measured element boxes and returns every issue found.
///
/// For each element, in order: the label bounds check, then overlap with
/// every later element (touching edges do not count), then, for the text
/// group only, the text-area check.
pub fn validate_scene(
    scene: &Scene,
    measured: &[MeasuredElement],
    text_area: BBox<Mm>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let bounds = scene.bounds();

    for (i, element) in measured.iter().enumerate() {
        if !bounds.contains(&element.bbox, CONTAINMENT_TOLERANCE) {
            report.add(ValidationIssue::out_of_bounds(element.id, element.bbox));
        }

        for other in &measured[i + 1..] {
            if element.bbox.intersects(&other.bbox) {
                report.add(ValidationIssue::overlap(
                    element.id,
                    other.id,
                    element.bbox.penetration(&other.bbox),
                ));
            }
        }

        if element.id == ElementId::Text && !text_area.contains(&element.bbox, CONTAINMENT_TOLERANCE)
        {
            report.add(ValidationIssue::text_out_of_area(element.id, element.bbox));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinlabelError;

    fn scene() -> Scene {
        Scene::new(12.0, 5.0, Vec::new())
    }

    fn measured(id: ElementId, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> MeasuredElement {
        MeasuredElement {
            id,
            bbox: BBox::from_xyxy(xmin, ymin, xmax, ymax),
        }
    }

    fn text_area() -> BBox<Mm> {
        BBox::from_xyxy(1.3, 0.0, 7.0, 5.0)
    }

    #[test]
    fn test_clean_layout_passes() {
        let elements = [
            measured(ElementId::Datamatrix, 7.0, 0.0, 12.0, 5.0),
            measured(ElementId::PinDot, 0.45, 2.25, 0.95, 2.75),
            measured(ElementId::Text, 1.4, 0.9, 7.0, 4.0),
        ];
        let report = validate_scene(&scene(), &elements, text_area());
        assert!(report.is_clean(), "{report}");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_overlap_reports_min_depth() {
        let elements = [
            measured(ElementId::Datamatrix, 7.0, 0.0, 12.0, 5.0),
            measured(ElementId::Text, 1.5, 1.0, 8.0, 4.0),
        ];
        let report = validate_scene(&scene(), &elements, BBox::from_xyxy(0.0, 0.0, 12.0, 5.0));
        assert_eq!(report.count(IssueCode::Overlap), 1);
        match report.into_result().unwrap_err() {
            PinlabelError::Overlap {
                first,
                second,
                depth,
            } => {
                assert_eq!(first, ElementId::Datamatrix);
                assert_eq!(second, ElementId::Text);
                assert!((depth - 1.0).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bounds_checked_before_overlap() {
        let elements = [
            measured(ElementId::Datamatrix, 7.0, 0.0, 12.5, 5.0),
            measured(ElementId::PinDot, 6.0, 1.0, 8.0, 2.0),
        ];
        let report = validate_scene(&scene(), &elements, text_area());
        assert_eq!(report.issues[0].code, IssueCode::OutOfBounds);
        assert_eq!(report.issues[1].code, IssueCode::Overlap);
        assert!(matches!(
            report.into_result(),
            Err(PinlabelError::OutOfBounds {
                element: ElementId::Datamatrix,
                ..
            })
        ));
    }

    #[test]
    fn test_text_area_only_applies_to_text() {
        let elements = [
            measured(ElementId::Datamatrix, 7.0, 0.0, 12.0, 5.0),
            measured(ElementId::Text, 0.5, 1.0, 6.0, 4.0),
        ];
        let report = validate_scene(&scene(), &elements, text_area());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].code, IssueCode::TextOutOfArea);
        assert!(report.to_string().contains("TextOutOfArea in text"));
    }

    #[test]
    fn test_rounding_noise_is_tolerated() {
        let elements = [measured(ElementId::Datamatrix, 7.0, 0.0, 12.000_000_000_001, 5.0)];
        assert!(validate_scene(&scene(), &elements, text_area()).is_clean());
    }

    #[test]
    fn test_issue_message_matches_error() {
        let issue = ValidationIssue::overlap(ElementId::PinDot, ElementId::Text, 0.5);
        assert_eq!(
            issue.message,
            "Objects pin_dot and text are overlapping by 0.5mm"
        );
    }
}
