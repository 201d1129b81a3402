//! Data Matrix module grids.
//!
//! The symbol encoder itself is an external collaborator behind the
//! [`SymbolEncoder`] trait: it turns a payload into an RGB pixel bitmap with
//! its own quiet zone. This module converts such a bitmap into a
//! [`ModuleGrid`], one boolean per module, which is what the label scene
//! stores and every renderer draws from.

mod encoder;

pub use encoder::DmtxEncoder;

use std::fmt;
use std::str::FromStr;

use crate::error::PinlabelError;

/// Square symbol sizes supported by ECC200 (modules per side).
const SQUARE_SIZES: [u16; 24] = [
    10, 12, 14, 16, 18, 20, 22, 24, 26, 32, 36, 40, 44, 48, 52, 64, 72, 80, 88, 96, 104, 120,
    132, 144,
];

/// Rectangular symbol sizes supported by ECC200 as (rows, columns).
const RECT_SIZES: [(u16, u16); 6] = [(8, 18), (8, 32), (12, 26), (12, 36), (16, 36), (16, 48)];

/// Which symbol sizes the encoder may pick from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Smallest square symbol that fits the payload.
    #[default]
    SquareAuto,
    /// Smallest rectangular symbol that fits the payload.
    RectAuto,
    /// Smallest symbol of any shape that fits the payload.
    ShapeAuto,
    /// Exactly this many rows and columns of modules (quiet zone excluded).
    Fixed { rows: u16, cols: u16 },
}

impl SizeClass {
    /// Creates a fixed size class, rejecting sizes ECC200 does not define.
    pub fn fixed(rows: u16, cols: u16) -> Result<Self, PinlabelError> {
        let known = if rows == cols {
            SQUARE_SIZES.contains(&rows)
        } else {
            RECT_SIZES.contains(&(rows, cols))
        };
        if known {
            Ok(SizeClass::Fixed { rows, cols })
        } else {
            Err(PinlabelError::Config(format!(
                "unsupported Data Matrix size {}x{}",
                rows, cols
            )))
        }
    }
}

impl FromStr for SizeClass {
    type Err = PinlabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SquareAuto" => Ok(SizeClass::SquareAuto),
            "RectAuto" => Ok(SizeClass::RectAuto),
            "ShapeAuto" => Ok(SizeClass::ShapeAuto),
            other => {
                let invalid = || PinlabelError::Config(format!("invalid Data Matrix size '{}'", other));
                let (rows, cols) = other.split_once('x').ok_or_else(invalid)?;
                let rows = rows.parse().map_err(|_| invalid())?;
                let cols = cols.parse().map_err(|_| invalid())?;
                SizeClass::fixed(rows, cols)
            }
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::SquareAuto => write!(f, "SquareAuto"),
            SizeClass::RectAuto => write!(f, "RectAuto"),
            SizeClass::ShapeAuto => write!(f, "ShapeAuto"),
            SizeClass::Fixed { rows, cols } => write!(f, "{}x{}", rows, cols),
        }
    }
}

/// An RGB bitmap as produced by a symbol encoder (3 bytes per pixel, row-major).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl PixelBitmap {
    /// RGB triple at `(x, y)`.
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// The external barcode encoder boundary.
pub trait SymbolEncoder {
    /// Encodes `payload` into a pixel bitmap including the quiet zone.
    fn encode(&self, payload: &[u8], size: SizeClass) -> Result<PixelBitmap, PinlabelError>;

    /// Side length of one module in bitmap pixels.
    fn module_px(&self) -> usize;
}

/// A barcode as a grid of modules; `true` means dark.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    height: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Builds a grid from row-major module values.
    ///
    /// Returns `None` when `modules.len() != width * height`.
    pub fn new(width: usize, height: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == width * height).then_some(Self {
            width,
            height,
            modules,
        })
    }

    /// Downsamples an encoder bitmap by its module scale.
    ///
    /// Takes every `module_px`-th pixel in both directions and marks a module
    /// dark only when that pixel is exactly black.
    pub fn from_bitmap(bitmap: &PixelBitmap, module_px: usize) -> Self {
        let step = module_px.max(1);
        let width = bitmap.width.div_ceil(step);
        let height = bitmap.height.div_ceil(step);

        let mut modules = Vec::with_capacity(width * height);
        for y in (0..bitmap.height).step_by(step) {
            for x in (0..bitmap.width).step_by(step) {
                modules.push(bitmap.rgb(x, y) == [0, 0, 0]);
            }
        }

        Self {
            width,
            height,
            modules,
        }
    }

    /// Encodes `data` with the given encoder and converts the result.
    pub fn encode_with(
        encoder: &dyn SymbolEncoder,
        data: &str,
        size: SizeClass,
    ) -> Result<Self, PinlabelError> {
        let bitmap = encoder.encode(data.as_bytes(), size)?;
        Ok(Self::from_bitmap(&bitmap, encoder.module_px()))
    }

    /// Encodes `data` with the default [`DmtxEncoder`].
    pub fn encode(data: &str, size: SizeClass) -> Result<Self, PinlabelError> {
        Self::encode_with(&DmtxEncoder::default(), data, size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the module at `(x, y)` is dark; out-of-range reads are light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.modules[y * self.width + x]
    }

    /// Coordinates of every dark module, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i % self.width, i / self.width))
    }
}
