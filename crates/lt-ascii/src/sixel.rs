//! Sixel : une colonne de 6 cellules par octet.
//!
//! Frame layout:
//!
//! ```text
//! CSI 1;1H  ESC P q  "1;1;W;H  #0;2;0;0;0#1;2;100;100;100
//! #1 <white band> $ #0 <black band> -      (one line per 6-row strip)
//! ESC \
//! ```
//!
//! Bit `k` of a band byte is row `k` of the strip, top to bottom, offset by 63.

use lt_core::board::Board;

use crate::error::EncodeError;
use crate::output::{CURSOR_HOME, FrameBuf};

/// Sixel data bytes are `mask + 63`, i.e. `?` ..= `~`.
pub const SIXEL_OFFSET: u8 = 63;

/// DCS introducer, sixel mode.
pub const DCS_SIXEL: &[u8] = b"\x1bPq";
/// String terminator, leaves sixel mode.
pub const ST: &[u8] = b"\x1b\\";

/// Register 0 black, register 1 white (RGB percentages).
const PALETTE: &[u8] = b"#0;2;0;0;0#1;2;100;100;100";

/// Upper bound for `"1;1;W;H` with W and H in decimal.
const RASTER_MAX: usize = 5 + 2 * 20 + 1;

/// Worst-case frame size for a board already padded to `rows × cols`.
#[must_use]
pub fn frame_capacity(rows: usize, cols: usize) -> usize {
    CURSOR_HOME.len()
        + DCS_SIXEL.len()
        + RASTER_MAX
        + PALETTE.len()
        + (rows / 6) * (2 * cols + 6)
        + ST.len()
}

/// Sixel byte for a 6-bit column mask.
///
/// # Example
/// ```
/// use lt_ascii::sixel::sixel_byte;
/// assert_eq!(sixel_byte(0), b'?');
/// assert_eq!(sixel_byte(0b11_1111), b'~');
/// ```
#[must_use]
#[inline(always)]
pub const fn sixel_byte(mask: u8) -> u8 {
    (mask & 0x3F) + SIXEL_OFFSET
}

/// Bits of column `col` in `strip` whose cell equals `target`.
#[inline(always)]
fn band_mask(strip: &[&[u8]; 6], col: usize, target: u8) -> u8 {
    let mut mask = 0u8;
    for (bit, row) in strip.iter().enumerate() {
        mask |= u8::from(row[col] == target) << bit;
    }
    mask
}

fn push_band(
    out: &mut FrameBuf,
    strip: &[&[u8]; 6],
    register: &[u8],
    target: u8,
) -> Result<(), EncodeError> {
    out.extend(register)?;
    for col in 0..strip[0].len() {
        out.push(sixel_byte(band_mask(strip, col, target)))?;
    }
    Ok(())
}

/// Encode the padded board as one sixel image, white band then black band per strip.
///
/// The caller guarantees `padded_rows % 6 == 0`.
///
/// # Errors
/// [`EncodeError::Overflow`] if `out` is too small.
pub fn encode_sixel(board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError> {
    out.extend(CURSOR_HOME)?;
    out.extend(DCS_SIXEL)?;
    out.extend(b"\"1;1;")?;
    out.push_decimal(board.padded_cols())?;
    out.push(b';')?;
    out.push_decimal(board.padded_rows())?;
    out.extend(PALETTE)?;

    for r in (0..board.padded_rows()).step_by(6) {
        let strip: [&[u8]; 6] = std::array::from_fn(|k| board.row(r + k));
        push_band(out, &strip, b"#1", 1)?;
        out.push(b'$')?;
        push_band(out, &strip, b"#0", 0)?;
        out.push(b'-')?;
    }

    out.extend(ST)
}
