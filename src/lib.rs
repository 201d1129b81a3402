//! Pinlabel: Data Matrix specimen labels for pinned insect collections.
//!
//! Each label carries a Data Matrix barcode, a pin alignment dot and a few
//! lines of text, laid out in millimeters. Labels are packed onto printable
//! sheets, optionally double-sided with mirrored back pages, and written as
//! PDF.
//!
//! # Modules
//!
//! - [`label`]: Label configuration and the layout engine
//! - [`sheet`]: Packing labels onto pages
//! - [`styles`]: Preset layouts for the supported collections
//! - [`datamatrix`]: Barcode encoding into module grids
//! - [`render`]: Measurement, SVG, raster and PDF backends
//! - [`validation`]: Overlap and containment checks
//! - [`error`]: Error types for pinlabel operations

pub mod datamatrix;
pub mod error;
pub mod geometry;
pub mod label;
pub mod numbers;
pub mod render;
pub mod scene;
pub mod sheet;
pub mod styles;
pub mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use error::PinlabelError;

use label::Label;
use numbers::NumberRanges;
use sheet::{Sheet, SheetConfig};
use styles::Style;

/// Resolution of the `--preview` image.
const PREVIEW_DPI: u32 = 600;

/// The pinlabel CLI application.
#[derive(Parser)]
#[command(name = "pinlabel")]
#[command(version, author, about)]
struct Cli {
    /// Label style.
    #[arg(short, long, value_enum, ignore_case = true)]
    style: Style,

    /// Label numbers, e.g. '1-5,7,9-11'.
    #[arg(short, long)]
    numbers: NumberRanges,

    /// Output PDF file.
    #[arg(short, long)]
    output: PathBuf,

    /// Extra text line printed below the number (NHMA only).
    #[arg(short, long)]
    bottom_text: Option<String>,

    /// Gap around each label in mm [default: 0.1].
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    label_padding: Option<f64>,

    /// Print the front pages only.
    #[arg(long)]
    single_sided: bool,

    /// Page size, margins and padding from a YAML or JSON file.
    #[arg(long, env = "PINLABEL_SHEET_CONFIG")]
    sheet_config: Option<PathBuf>,

    /// Also write the first label as a PNG preview.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Skip the overlap and bounds checks on each label.
    #[arg(long)]
    no_check: bool,
}

/// Run the pinlabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PinlabelError> {
    let cli = Cli::parse();

    let mut sheet_config = match &cli.sheet_config {
        Some(path) => SheetConfig::from_path(path)?,
        // Double-sided unless told otherwise
        None => SheetConfig::default().with_double_sided(true),
    };
    if let Some(padding) = cli.label_padding {
        sheet_config.label_padding = padding;
    }
    if cli.single_sided {
        sheet_config.double_sided = false;
    }

    let bottom_text = cli.bottom_text.as_deref();
    if bottom_text.is_some() && !cli.style.supports_bottom_text() {
        log::warn!("bottom text is not printed on {:?} labels", cli.style);
    }

    let labels = cli
        .numbers
        .as_slice()
        .iter()
        .map(|&number| {
            let config = cli
                .style
                .config(number, bottom_text)
                .with_check_overlap(!cli.no_check);
            Label::new(config)
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("built {} label(s)", labels.len());

    let sheet = Sheet::new(&labels, sheet_config)?;

    let report = sheet.write_pdf(&cli.output)?;

    if let (Some(path), Some(first)) = (&cli.preview, labels.first()) {
        first.write_png(path, PREVIEW_DPI)?;
    }

    print!("{}", report);
    println!("Wrote {}", cli.output.display());

    Ok(())
}
