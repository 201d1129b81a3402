//! Default symbol encoder backed by the `datamatrix` crate.

use datamatrix::{DataMatrix, SymbolList, SymbolSize};

use super::{PixelBitmap, SizeClass, SymbolEncoder};
use crate::error::PinlabelError;

/// Renders ECC200 symbols as RGB bitmaps.
///
/// Every module is `module_px` pixels square and the symbol is surrounded by
/// a white quiet zone `quiet_zone` modules wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DmtxEncoder {
    module_px: usize,
    quiet_zone: usize,
}

impl Default for DmtxEncoder {
    fn default() -> Self {
        Self {
            module_px: 5,
            quiet_zone: 2,
        }
    }
}

impl DmtxEncoder {
    pub fn new(module_px: usize, quiet_zone: usize) -> Self {
        Self {
            module_px: module_px.max(1),
            quiet_zone,
        }
    }
}

impl SymbolEncoder for DmtxEncoder {
    fn encode(&self, payload: &[u8], size: SizeClass) -> Result<PixelBitmap, PinlabelError> {
        let symbols = symbol_list(size)?;
        let code = DataMatrix::encode(payload, symbols).map_err(|err| {
            log::debug!("Data Matrix encoding failed for {} bytes: {:?}", payload.len(), err);
            PinlabelError::Capacity {
                size: size.to_string(),
                len: payload.len(),
            }
        })?;

        let bitmap = code.bitmap();
        let px = self.module_px;
        let width = (bitmap.width() + 2 * self.quiet_zone) * px;
        let height = (bitmap.height() + 2 * self.quiet_zone) * px;

        let mut pixels = vec![255u8; width * height * 3];
        for (mx, my) in bitmap.pixels() {
            let x0 = (mx + self.quiet_zone) * px;
            let y0 = (my + self.quiet_zone) * px;
            for y in y0..y0 + px {
                let row = y * width;
                pixels[(row + x0) * 3..(row + x0 + px) * 3].fill(0);
            }
        }

        Ok(PixelBitmap {
            width,
            height,
            pixels,
        })
    }

    fn module_px(&self) -> usize {
        self.module_px
    }
}

fn symbol_list(size: SizeClass) -> Result<SymbolList, PinlabelError> {
    Ok(match size {
        SizeClass::SquareAuto => SymbolList::default().enforce_square(),
        SizeClass::RectAuto => SymbolList::default().enforce_rectangular(),
        SizeClass::ShapeAuto => SymbolList::default(),
        SizeClass::Fixed { rows, cols } => SymbolList::with_whitelist([symbol_size(rows, cols)?]),
    })
}

fn symbol_size(rows: u16, cols: u16) -> Result<SymbolSize, PinlabelError> {
    let size = match (rows, cols) {
        (10, 10) => SymbolSize::Square10,
        (12, 12) => SymbolSize::Square12,
        (14, 14) => SymbolSize::Square14,
        (16, 16) => SymbolSize::Square16,
        (18, 18) => SymbolSize::Square18,
        (20, 20) => SymbolSize::Square20,
        (22, 22) => SymbolSize::Square22,
        (24, 24) => SymbolSize::Square24,
        (26, 26) => SymbolSize::Square26,
        (32, 32) => SymbolSize::Square32,
        (36, 36) => SymbolSize::Square36,
        (40, 40) => SymbolSize::Square40,
        (44, 44) => SymbolSize::Square44,
        (48, 48) => SymbolSize::Square48,
        (52, 52) => SymbolSize::Square52,
        (64, 64) => SymbolSize::Square64,
        (72, 72) => SymbolSize::Square72,
        (80, 80) => SymbolSize::Square80,
        (88, 88) => SymbolSize::Square88,
        (96, 96) => SymbolSize::Square96,
        (104, 104) => SymbolSize::Square104,
        (120, 120) => SymbolSize::Square120,
        (132, 132) => SymbolSize::Square132,
        (144, 144) => SymbolSize::Square144,
        (8, 18) => SymbolSize::Rect8x18,
        (8, 32) => SymbolSize::Rect8x32,
        (12, 26) => SymbolSize::Rect12x26,
        (12, 36) => SymbolSize::Rect12x36,
        (16, 36) => SymbolSize::Rect16x36,
        (16, 48) => SymbolSize::Rect16x48,
        _ => {
            return Err(PinlabelError::Config(format!(
                "unsupported Data Matrix size {}x{}",
                rows, cols
            )))
        }
    };
    Ok(size)
}
