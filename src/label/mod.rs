//! The label layout engine.
//!
//! Turns a [`LabelConfig`] into a [`Scene`] by placing the barcode, the pin
//! alignment dot and the text block in label millimeters (origin top-left,
//! x right, y down), then validates the result.
//!
//! # Example
//!
//! ```
//! use pinlabel::label::{Label, LabelConfig};
//!
//! let config = LabelConfig::new("000000042", 12.0, 5.0, ["NHMD", "42"], 3.55);
//! let label = Label::new(config).unwrap();
//! assert!(label.to_svg_string().contains("id=\"datamatrix\""));
//! ```

mod config;
mod layout;

pub use config::{Alignment, LabelConfig, Margins, Offset, TextAlign, TextOrientation};
pub use layout::{barcode_anchor, dot_anchor, text_placement, TextPlacement};

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, ImageFormat};

use crate::datamatrix::{DmtxEncoder, ModuleGrid, SymbolEncoder};
use crate::error::PinlabelError;
use crate::geometry::{BBox, Mm};
use crate::render::{raster, svg, Measure, TextMeasurer};
use crate::scene::Scene;
use crate::validation::{validate_scene, ValidationReport};

/// A laid-out label. Immutable once built.
#[derive(Clone, Debug)]
pub struct Label {
    config: LabelConfig,
    scene: Scene,
}

impl Label {
    /// Builds a label with the default Data Matrix encoder and text measurer.
    pub fn new(config: LabelConfig) -> Result<Self, PinlabelError> {
        Self::build(config, &DmtxEncoder::default(), &TextMeasurer::default())
    }

    /// Builds a label with injected encoder and measurer.
    ///
    /// Fails on invalid configuration, on a dot placed outside the label and,
    /// when `check_overlap` is set, on the first layout issue found.
    pub fn build(
        config: LabelConfig,
        encoder: &dyn SymbolEncoder,
        measurer: &dyn Measure,
    ) -> Result<Self, PinlabelError> {
        config.validate()?;
        let scene = layout::build_scene(&config, encoder)?;

        if config.check_overlap {
            let measured = measurer.measure(&scene);
            validate_scene(&scene, &measured, text_area(&config)).into_result()?;
        }

        log::debug!("built label for payload {:?}", config.data);
        Ok(Self { config, scene })
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    /// The barcode module grid, quiet zone included.
    pub fn grid(&self) -> Option<&ModuleGrid> {
        self.scene.barcode().map(|(_, grid)| grid)
    }

    /// Full validation report, regardless of `check_overlap`.
    pub fn validate(&self, measurer: &dyn Measure) -> ValidationReport {
        let measured = measurer.measure(&self.scene);
        validate_scene(&self.scene, &measured, text_area(&self.config))
    }

    pub fn to_svg_string(&self) -> String {
        svg::scene_to_svg(&self.scene)
    }

    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<(), PinlabelError> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }

    /// Rasterizes the label; text is not drawn.
    pub fn to_image(&self, dpi: u32) -> GrayImage {
        raster::rasterize(&self.scene, dpi)
    }

    /// PNG-encoded raster of the label.
    pub fn to_png(&self, dpi: u32) -> Result<Vec<u8>, PinlabelError> {
        let mut bytes = Cursor::new(Vec::new());
        self.to_image(dpi)
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|source| PinlabelError::ImageWrite {
                path: "<memory>".into(),
                source,
            })?;
        Ok(bytes.into_inner())
    }

    pub fn write_png(&self, path: impl AsRef<Path>, dpi: u32) -> Result<(), PinlabelError> {
        let path = path.as_ref();
        self.to_image(dpi)
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| PinlabelError::ImageWrite {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// The label rectangle reduced by the text area margins.
pub fn text_area(config: &LabelConfig) -> BBox<Mm> {
    let m = config.text_area_margins;
    BBox::from_xyxy(m.left, m.top, config.width - m.right, config.height - m.bottom)
}
