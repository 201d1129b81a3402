//! In-memory PDF output built with `lopdf`.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::{winansi, FontMetrics, Gray, PageSurface, Placement};
use crate::error::PinlabelError;
use crate::geometry::{BBox, Page, Transform, MM_TO_PT};
use crate::scene::{Element, Scene, TextAnchor, TextGroup};

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f64 = 0.552_284_749_8;

/// Courier advances 0.6 em; scale glyphs horizontally to the measured advance.
const COURIER_ADVANCE: f64 = 0.6;

const FONT_NAME: &str = "F1";

struct OpenPage {
    width: f64,
    height: f64,
    content: Content,
}

/// A [`PageSurface`] collecting pages into a PDF document.
///
/// Nothing touches the filesystem: call [`PdfSurface::finish`] for the bytes.
pub struct PdfSurface {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<OpenPage>,
    metrics: FontMetrics,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::with_metrics(FontMetrics::default())
    }

    /// Text is stretched so each glyph advances `metrics.advance` em.
    pub fn with_metrics(metrics: FontMetrics) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        document.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! { FONT_NAME => font_id },
            }),
        );
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            current: None,
            metrics,
        }
    }

    /// Number of completed pages.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, PinlabelError> {
        if self.current.is_some() {
            return Err(PinlabelError::Surface(
                "finish called with an open page".to_string(),
            ));
        }
        if let Some(Object::Dictionary(pages)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages.set("Kids", kids);
            pages.set("Count", self.page_ids.len() as i64);
        }
        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }

    fn page(&mut self) -> Result<&mut Content, PinlabelError> {
        self.current
            .as_mut()
            .map(|page| &mut page.content)
            .ok_or_else(|| PinlabelError::Surface("no page has been started".to_string()))
    }
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for PdfSurface {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), PinlabelError> {
        if self.current.is_some() {
            return Err(PinlabelError::Surface(
                "begin_page called before end_page".to_string(),
            ));
        }
        self.current = Some(OpenPage {
            width,
            height,
            content: Content { operations: vec![] },
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: BBox<Page>, color: Gray) -> Result<(), PinlabelError> {
        let ops = &mut self.page()?.operations;
        ops.push(Operation::new("g", vec![real(color.fraction())]));
        ops.push(Operation::new(
            "re",
            vec![
                real(rect.xmin() * MM_TO_PT),
                real(rect.ymin() * MM_TO_PT),
                real(rect.width() * MM_TO_PT),
                real(rect.height() * MM_TO_PT),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
        Ok(())
    }

    fn draw_scene(&mut self, scene: &Scene, placement: Placement) -> Result<(), PinlabelError> {
        let metrics = self.metrics;
        let ops = &mut self.page()?.operations;
        let to_page = Transform::scale(MM_TO_PT, MM_TO_PT) * placement.transform(scene.height());

        ops.push(Operation::new("q", vec![]));
        ops.push(concat(&to_page));
        for element in scene.elements() {
            match element {
                Element::Background => {
                    push_rect(ops, 0.0, 0.0, scene.width(), scene.height(), Gray::WHITE);
                }
                Element::Barcode { transform, grid } => {
                    ops.push(Operation::new("q", vec![]));
                    ops.push(concat(transform));
                    push_rect(
                        ops,
                        0.0,
                        0.0,
                        grid.width() as f64,
                        grid.height() as f64,
                        Gray::WHITE,
                    );
                    ops.push(Operation::new("g", vec![real(0.0)]));
                    for (x, y) in grid.dark_modules() {
                        ops.push(Operation::new(
                            "re",
                            vec![real(x as f64), real(y as f64), real(1.0), real(1.0)],
                        ));
                    }
                    ops.push(Operation::new("f", vec![]));
                    ops.push(Operation::new("Q", vec![]));
                }
                Element::Dot { center, radius } => {
                    push_circle(ops, center.x, center.y, *radius);
                }
                Element::Text(group) => push_text(ops, group, &metrics)?,
            }
        }
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), PinlabelError> {
        let page = self
            .current
            .take()
            .ok_or_else(|| PinlabelError::Surface("end_page without begin_page".to_string()))?;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&page.content.encode()?)?;
        let compressed = encoder.finish()?;
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                real(page.width * MM_TO_PT),
                real(page.height * MM_TO_PT),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }
}

fn real(value: f64) -> Object {
    (value as f32).into()
}

fn concat(t: &Transform) -> Operation {
    Operation::new("cm", t.to_array().into_iter().map(real).collect())
}

fn push_rect(ops: &mut Vec<Operation>, x: f64, y: f64, w: f64, h: f64, color: Gray) {
    ops.push(Operation::new("g", vec![real(color.fraction())]));
    ops.push(Operation::new(
        "re",
        vec![real(x), real(y), real(w), real(h)],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn push_circle(ops: &mut Vec<Operation>, cx: f64, cy: f64, r: f64) {
    let k = KAPPA * r;
    ops.push(Operation::new("g", vec![real(0.0)]));
    ops.push(Operation::new("m", vec![real(cx + r), real(cy)]));
    let arcs = [
        [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
        [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
        [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
        [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
    ];
    for arc in arcs {
        ops.push(Operation::new("c", arc.into_iter().map(real).collect()));
    }
    ops.push(Operation::new("f", vec![]));
}

fn push_text(
    ops: &mut Vec<Operation>,
    group: &TextGroup,
    metrics: &FontMetrics,
) -> Result<(), PinlabelError> {
    let size = group.font_size;
    ops.push(Operation::new("q", vec![]));
    ops.push(concat(&group.transform));
    ops.push(Operation::new("g", vec![real(0.0)]));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(FONT_NAME.as_bytes().to_vec()), real(size)],
    ));
    ops.push(Operation::new(
        "Tz",
        vec![real(100.0 * metrics.advance / COURIER_ADVANCE)],
    ));
    for line in &group.lines {
        let width = metrics.text_width(&line.content, size);
        let x = match group.anchor {
            TextAnchor::Start => line.x,
            TextAnchor::Middle => line.x - width / 2.0,
            TextAnchor::End => line.x - width,
        };
        // the label space is y-down; flip glyphs back upright
        ops.push(Operation::new(
            "Tm",
            vec![
                real(1.0),
                real(0.0),
                real(0.0),
                real(-1.0),
                real(x),
                real(line.y),
            ],
        ));
        let bytes = winansi::encode(&line.content).map_err(|c| {
            PinlabelError::Config(format!("no PDF glyph for {:?} in {:?}", c, line.content))
        })?;
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Literal)],
        ));
    }
    ops.push(Operation::new("ET", vec![]));
    ops.push(Operation::new("Q", vec![]));
    Ok(())
}
