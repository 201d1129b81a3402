//! The sheet packer.
//!
//! Tiles labels row by row across fixed-size pages, each label framed by a
//! padding box. Double-sided sheets follow every front page with a back page
//! holding the same labels rotated 180° and mirrored horizontally, so that
//! front and back line up when the sheet is printed on both sides.
//!
//! Page coordinates are millimeters with the origin at the bottom-left corner
//! of the page and y pointing up.

mod report;

pub use report::SheetReport;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PinlabelError;
use crate::geometry::{BBox, Coord, Page, Rotation};
use crate::label::{Label, Margins};
use crate::render::{Gray, Measure, PageSurface, PdfSurface, Placement, TextMeasurer};

/// Page geometry and printing options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Page width in mm.
    pub page_width: f64,
    /// Page height in mm.
    pub page_height: f64,
    pub margins: Margins,
    /// Gap in mm on every side of a label, drawn as a gray frame.
    pub label_padding: f64,
    pub double_sided: bool,
}

impl Default for SheetConfig {
    /// A4 landscape with 15 mm margins.
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            margins: Margins::uniform(15.0),
            label_padding: 0.1,
            double_sided: false,
        }
    }
}

impl SheetConfig {
    /// Loads a config from a `.yaml`/`.yml` or `.json` file.
    ///
    /// Missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, PinlabelError> {
        let data = fs::read_to_string(path).map_err(PinlabelError::Io)?;
        let parse_error = |message: String| PinlabelError::SheetConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&data).map_err(|e| parse_error(e.to_string()))
            }
            Some("json") => serde_json::from_str(&data).map_err(|e| parse_error(e.to_string())),
            _ => Err(parse_error(
                "unsupported extension (expected .yaml, .yml or .json)".to_string(),
            )),
        }
    }

    pub fn with_label_padding(mut self, padding: f64) -> Self {
        self.label_padding = padding;
        self
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Usable width and height between the margins.
    pub fn usable_area(&self) -> (f64, f64) {
        (
            self.page_width - self.margins.left - self.margins.right,
            self.page_height - self.margins.top - self.margins.bottom,
        )
    }

    fn validate(&self) -> Result<(), PinlabelError> {
        if !(self.page_width.is_finite() && self.page_height.is_finite())
            || self.page_width <= 0.0
            || self.page_height <= 0.0
        {
            return Err(PinlabelError::Config(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !self.margins.is_finite() {
            return Err(PinlabelError::Config(
                "page margins must be numbers".to_string(),
            ));
        }
        if !self.label_padding.is_finite() || self.label_padding < 0.0 {
            return Err(PinlabelError::Config(format!(
                "label padding must be zero or positive, got {}",
                self.label_padding
            )));
        }
        Ok(())
    }
}

/// Which side of the paper a page is printed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// One label on a planned page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedLabel {
    /// Index into the sheet's labels.
    pub index: usize,
    pub placement: Placement,
    /// Padding frame, filled gray.
    pub padding_box: BBox<Page>,
    /// Label area inside the frame, filled white.
    pub label_box: BBox<Page>,
}

/// The labels of one page.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    pub side: Side,
    pub labels: Vec<PlacedLabel>,
}

/// A front placement waiting for its back page.
#[derive(Clone, Copy, Debug)]
struct QueuedLabel {
    index: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Packing state of one `plan` call.
///
/// `(x, y)` is the top-left corner of the next label slot.
struct PackCursor {
    x: f64,
    y: f64,
    front: Vec<PlacedLabel>,
    backs: Vec<QueuedLabel>,
}

impl PackCursor {
    /// Closes the current front page and, if double-sided, its back page.
    fn finish_page(&mut self, pages: &mut Vec<PagePlan>, config: &SheetConfig) {
        pages.push(PagePlan {
            side: Side::Front,
            labels: std::mem::take(&mut self.front),
        });
        let backs = std::mem::take(&mut self.backs);
        if config.double_sided {
            let p = config.label_padding;
            let labels = backs
                .into_iter()
                .map(|q| {
                    let x_back = config.page_width - q.x;
                    PlacedLabel {
                        index: q.index,
                        placement: Placement::new(Coord::new(x_back, q.y), Rotation::Deg180),
                        padding_box: BBox::from_xyxy(
                            x_back - q.width - p,
                            q.y - q.height - p,
                            x_back + p,
                            q.y + p,
                        ),
                        label_box: BBox::from_xyxy(x_back - q.width, q.y - q.height, x_back, q.y),
                    }
                })
                .collect();
            pages.push(PagePlan {
                side: Side::Back,
                labels,
            });
        }
    }
}

/// A set of labels to print on pages.
#[derive(Debug)]
pub struct Sheet<'a> {
    labels: &'a [Label],
    config: SheetConfig,
}

impl<'a> Sheet<'a> {
    /// Checks the page can hold the labels.
    ///
    /// The first label's size is compared against the usable page area.
    pub fn new(labels: &'a [Label], config: SheetConfig) -> Result<Self, PinlabelError> {
        config.validate()?;
        let first = labels
            .first()
            .ok_or_else(|| PinlabelError::Config("no labels to place".to_string()))?;

        let (usable_width, usable_height) = config.usable_area();
        if usable_width < first.width() {
            return Err(PinlabelError::Config(format!(
                "page width between margins ({}mm) is smaller than label width ({}mm)",
                usable_width,
                first.width()
            )));
        }
        if usable_height < first.height() {
            return Err(PinlabelError::Config(format!(
                "page height between margins ({}mm) is smaller than label height ({}mm)",
                usable_height,
                first.height()
            )));
        }

        Ok(Self { labels, config })
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn labels(&self) -> &[Label] {
        self.labels
    }

    /// Assigns every label a page and position.
    ///
    /// Pages come out in printing order: front 1, back 1, front 2, back 2, ...
    /// (backs only when double-sided).
    pub fn plan(&self, measurer: &dyn Measure) -> Vec<PagePlan> {
        let c = &self.config;
        let p = c.label_padding;
        let top = c.page_height - c.margins.top;
        let right = c.page_width - c.margins.right;

        let mut pages = Vec::new();
        let mut cursor = PackCursor {
            x: c.margins.left,
            y: top,
            front: Vec::new(),
            backs: Vec::new(),
        };

        for (index, label) in self.labels.iter().enumerate() {
            let (w, h) = measurer.footprint(label.scene());

            if cursor.x + w > right {
                cursor.x = c.margins.left;
                cursor.y -= h + 2.0 * p;
                if cursor.y - h < c.margins.bottom {
                    cursor.finish_page(&mut pages, c);
                    cursor.y = top;
                }
            }

            let (x, y) = (cursor.x, cursor.y);
            cursor.front.push(PlacedLabel {
                index,
                placement: Placement::new(Coord::new(x, y - h), Rotation::Deg0),
                padding_box: BBox::from_xyxy(x - p, y - h - p, x + w + p, y + p),
                label_box: BBox::from_xyxy(x, y - h, x + w, y),
            });
            cursor.backs.push(QueuedLabel {
                index,
                x,
                y,
                width: w,
                height: h,
            });
            cursor.x += w + 2.0 * p;
        }
        cursor.finish_page(&mut pages, c);

        pages
    }

    /// Draws every page onto `surface`.
    pub fn generate(
        &self,
        surface: &mut dyn PageSurface,
        measurer: &dyn Measure,
    ) -> Result<SheetReport, PinlabelError> {
        let pages = self.plan(measurer);
        let mut report = SheetReport::default();

        for (number, page) in pages.iter().enumerate() {
            surface.begin_page(self.config.page_width, self.config.page_height)?;
            for placed in &page.labels {
                let label = &self.labels[placed.index];
                surface.fill_rect(placed.padding_box, Gray::PADDING)?;
                surface.fill_rect(placed.label_box, Gray::WHITE)?;
                surface.draw_scene(label.scene(), placed.placement)?;
            }
            surface.end_page()?;

            match page.side {
                Side::Front => {
                    report.front_pages += 1;
                    report.labels += page.labels.len();
                }
                Side::Back => report.back_pages += 1,
            }
            log::info!(
                "page {} ({:?}): {} label(s)",
                number + 1,
                page.side,
                page.labels.len()
            );
        }

        if let Some(first) = pages.first() {
            let (per_row, rows) = first_page_layout(first);
            report.labels_per_row = per_row;
            report.rows_per_page = rows;
        }

        Ok(report)
    }

    /// Renders the sheet to a PDF file.
    ///
    /// The document is assembled in memory; the file is only written once
    /// every page rendered.
    pub fn write_pdf(&self, path: impl AsRef<Path>) -> Result<SheetReport, PinlabelError> {
        let path = path.as_ref();
        let mut pdf = PdfSurface::new();
        let report = self.generate(&mut pdf, &TextMeasurer::default())?;
        let bytes = pdf.finish()?;
        fs::write(path, bytes).map_err(|source| PinlabelError::PdfWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} page(s) to {}", report.total_pages(), path.display());
        Ok(report)
    }
}

/// Labels in the first row and number of rows on a front page.
fn first_page_layout(page: &PagePlan) -> (usize, usize) {
    let Some(first) = page.labels.first() else {
        return (0, 0);
    };
    let row_top = first.label_box.ymax();
    let per_row = page
        .labels
        .iter()
        .take_while(|l| l.label_box.ymax() == row_top)
        .count();

    let mut rows = 0;
    let mut last_top = f64::NAN;
    for placed in &page.labels {
        if placed.label_box.ymax() != last_top {
            rows += 1;
            last_top = placed.label_box.ymax();
        }
    }
    (per_row, rows)
}
