//! Integration tests for packing labels onto pages.

use pinlabel::geometry::{BBox, Page, Rotation};
use pinlabel::render::{Gray, PageSurface, Placement, TextMeasurer};
use pinlabel::scene::Scene;
use pinlabel::sheet::{Sheet, SheetConfig, Side};
use pinlabel::styles::Style;
use pinlabel::PinlabelError;

mod common;
use common::{style_labels, FixedFootprint};

/// Records surface calls instead of drawing.
#[derive(Default)]
struct RecordingSurface {
    pages: Vec<Vec<Call>>,
    open: bool,
}

#[derive(Debug, PartialEq)]
enum Call {
    Fill(BBox<Page>, Gray),
    Draw(Placement),
}

impl PageSurface for RecordingSurface {
    fn begin_page(&mut self, _width: f64, _height: f64) -> Result<(), PinlabelError> {
        assert!(!self.open, "page begun twice");
        self.open = true;
        self.pages.push(Vec::new());
        Ok(())
    }

    fn fill_rect(&mut self, rect: BBox<Page>, color: Gray) -> Result<(), PinlabelError> {
        self.current().push(Call::Fill(rect, color));
        Ok(())
    }

    fn draw_scene(&mut self, _scene: &Scene, placement: Placement) -> Result<(), PinlabelError> {
        self.current().push(Call::Draw(placement));
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), PinlabelError> {
        assert!(self.open, "page ended twice");
        self.open = false;
        Ok(())
    }
}

impl RecordingSurface {
    fn current(&mut self) -> &mut Vec<Call> {
        assert!(self.open, "draw outside a page");
        self.pages.last_mut().expect("a page is open")
    }
}

#[test]
fn nhmd_on_a4_landscape() {
    let labels = style_labels(Style::Nhmd, 21 * 34 * 2 + 5);
    let sheet = Sheet::new(&labels, SheetConfig::default()).unwrap();

    let mut surface = RecordingSurface::default();
    let report = sheet
        .generate(&mut surface, &TextMeasurer::default())
        .unwrap();

    assert_eq!(report.labels, labels.len());
    assert_eq!(report.front_pages, 3);
    assert_eq!(report.back_pages, 0);
    assert_eq!(report.labels_per_row, 21);
    assert_eq!(report.rows_per_page, 34);
    assert_eq!(surface.pages.len(), 3);
}

#[test]
fn padding_is_drawn_beneath_each_label() {
    let labels = style_labels(Style::Nhmd, 2);
    let sheet = Sheet::new(&labels, SheetConfig::default()).unwrap();
    let mut surface = RecordingSurface::default();
    sheet
        .generate(&mut surface, &TextMeasurer::default())
        .unwrap();

    let page = &surface.pages[0];
    assert_eq!(page.len(), 6);
    for chunk in page.chunks(3) {
        assert!(matches!(chunk[0], Call::Fill(_, Gray::PADDING)));
        assert!(matches!(chunk[1], Call::Fill(_, Gray::WHITE)));
        assert!(matches!(chunk[2], Call::Draw(_)));
    }
}

#[test]
fn double_sided_pages_alternate() {
    let labels = style_labels(Style::Nhma, 40);
    let config = SheetConfig::default().with_double_sided(true);
    let sheet = Sheet::new(&labels, config).unwrap();
    let pages = sheet.plan(&TextMeasurer::default());

    assert_eq!(pages.len() % 2, 0);
    for (k, pair) in pages.chunks(2).enumerate() {
        let (front, back) = (&pair[0], &pair[1]);
        assert_eq!(front.side, Side::Front, "page {}", 2 * k);
        assert_eq!(back.side, Side::Back, "page {}", 2 * k + 1);
        assert_eq!(front.labels.len(), back.labels.len());

        for (f, b) in front.labels.iter().zip(&back.labels) {
            assert_eq!(f.index, b.index);
            assert_eq!(f.placement.rotation, Rotation::Deg0);
            assert_eq!(b.placement.rotation, Rotation::Deg180);
            // back anchor sits at the mirrored x of the front label's left edge
            assert!((b.placement.anchor.x - (297.0 - f.label_box.xmin())).abs() < 1e-9);
            assert!((b.label_box.xmin() - (297.0 - f.label_box.xmax())).abs() < 1e-9);
            assert_eq!(b.label_box.ymax(), f.label_box.ymax());
        }
    }

    let placed: Vec<usize> = pages
        .iter()
        .filter(|p| p.side == Side::Front)
        .flat_map(|p| p.labels.iter().map(|l| l.index))
        .collect();
    assert_eq!(placed, (0..labels.len()).collect::<Vec<_>>());
}

#[test]
fn back_labels_cover_their_mirrored_frame() {
    let labels = style_labels(Style::Nhmd, 3);
    let config = SheetConfig::default().with_double_sided(true);
    let sheet = Sheet::new(&labels, config).unwrap();
    let pages = sheet.plan(&TextMeasurer::default());

    for page in &pages {
        for placed in &page.labels {
            let footprint = placed.placement.footprint(12.0, 5.0);
            for (got, want) in [
                (footprint.xmin(), placed.label_box.xmin()),
                (footprint.ymin(), placed.label_box.ymin()),
                (footprint.xmax(), placed.label_box.xmax()),
                (footprint.ymax(), placed.label_box.ymax()),
            ] {
                assert!((got - want).abs() < 1e-9, "{:?} side: {got} != {want}", page.side);
            }
        }
    }
}

#[test]
fn footprint_comes_from_the_measurer() {
    let labels = vec![Style::Nhmd.label(1, None).unwrap(); 30];
    let sheet = Sheet::new(&labels, SheetConfig::default()).unwrap();
    // (267 + 0.2) / (20 + 0.2) = 13.2
    let measurer = FixedFootprint {
        width: 20.0,
        height: 10.0,
    };
    let pages = sheet.plan(&measurer);

    let first_row_top = pages[0].labels[0].label_box.ymax();
    let per_row = pages[0]
        .labels
        .iter()
        .filter(|l| l.label_box.ymax() == first_row_top)
        .count();
    assert_eq!(per_row, 13);
    assert_eq!(pages[0].labels[13].label_box.xmin(), 15.0);
    assert!((pages[0].labels[13].label_box.height() - 10.0).abs() < 1e-9);
}

#[test]
fn write_pdf_round_trips_page_count() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("sheet.pdf");
    let labels = style_labels(Style::Nhma, 3);
    let config = SheetConfig::default().with_double_sided(true);

    let report = Sheet::new(&labels, config)
        .unwrap()
        .write_pdf(&path)
        .unwrap();
    assert_eq!(report.total_pages(), 2);

    let document = lopdf::Document::load(&path).expect("load pdf");
    assert_eq!(document.get_pages().len(), 2);
}

#[test]
fn write_pdf_into_missing_directory_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("missing").join("sheet.pdf");
    let labels = style_labels(Style::Nhmd, 1);

    let err = Sheet::new(&labels, SheetConfig::default())
        .unwrap()
        .write_pdf(&path)
        .unwrap_err();
    assert!(matches!(err, PinlabelError::PdfWrite { .. }));
}
