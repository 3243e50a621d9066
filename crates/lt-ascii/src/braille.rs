//! Braille (U+2800) : 2×4 cellules par glyphe.
//!
//! Bits activés :
//! +---+---+
//! | 1 | 4 |
//! +---+---+
//! | 2 | 5 |
//! +---+---+
//! | 3 | 6 |
//! +---+---+
//! | 7 | 8 |
//! +---+---+
//!
//! Dot `n` is mask bit `n - 1`, codepoint = `U+2800 | mask`. The whole block
//! lives in `U+2800..=U+28FF`, so the UTF-8 form is always
//! `1110_0010 1010_00yy 10xx_xxxx` with `yy` the dots 7-8 and `xxxxxx` the dots 1-6.

use lt_core::board::Board;

use crate::error::EncodeError;
use crate::output::{CURSOR_HOME, FrameBuf};

/// Braille base codepoint (U+2800).
const BRAILLE_BASE: u32 = 0x2800;

/// Worst-case frame size for a board already padded to `rows × cols`.
#[must_use]
pub fn frame_capacity(rows: usize, cols: usize) -> usize {
    CURSOR_HOME.len() + (rows / 4) * ((cols / 2) * 3 + 1)
}

/// Map un masque 8 bits vers le caractère Braille correspondant.
///
/// # Example
/// ```
/// use lt_ascii::braille::braille_char;
/// assert_eq!(braille_char(0x00), '\u{2800}');
/// assert_eq!(braille_char(0xFF), '\u{28FF}');
/// ```
#[must_use]
#[inline(always)]
pub const fn braille_char(mask: u8) -> char {
    match char::from_u32(BRAILLE_BASE + mask as u32) {
        Some(c) => c,
        None => ' ',
    }
}

/// Fixed 3-byte UTF-8 form of `U+2800 | mask`.
///
/// # Example
/// ```
/// use lt_ascii::braille::braille_utf8;
/// assert_eq!(braille_utf8(0b0100_0001), [0xE2, 0xA1, 0x81]);
/// ```
#[must_use]
#[inline(always)]
pub const fn braille_utf8(mask: u8) -> [u8; 3] {
    [0xE2, 0xA0 | (mask >> 6), 0x80 | (mask & 0x3F)]
}

/// Pack a 2×4 block, `block[row][col]`, into a dot mask.
///
/// # Example
/// ```
/// use lt_ascii::braille::dot_mask;
/// // dot 1 (top-left) and dot 8 (bottom-right)
/// assert_eq!(dot_mask([[1, 0], [0, 0], [0, 0], [0, 1]]), 0b1000_0001);
/// ```
#[must_use]
#[inline(always)]
pub fn dot_mask(block: [[u8; 2]; 4]) -> u8 {
    block[0][0]
        | block[1][0] << 1
        | block[2][0] << 2
        | block[0][1] << 3
        | block[1][1] << 4
        | block[2][1] << 5
        | block[3][0] << 6
        | block[3][1] << 7
}

/// Encode the padded board, one Braille glyph per 2×4 block, newline per glyph row.
///
/// The caller guarantees `padded_rows % 4 == 0` and `padded_cols % 2 == 0`.
///
/// # Errors
/// [`EncodeError::Overflow`] if `out` is too small.
pub fn encode_braille(board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError> {
    out.extend(CURSOR_HOME)?;
    for r in (0..board.padded_rows()).step_by(4) {
        let rows = [
            board.row(r),
            board.row(r + 1),
            board.row(r + 2),
            board.row(r + 3),
        ];
        for c in (0..board.padded_cols()).step_by(2) {
            let mask = dot_mask([
                [rows[0][c], rows[0][c + 1]],
                [rows[1][c], rows[1][c + 1]],
                [rows[2][c], rows[2][c + 1]],
                [rows[3][c], rows[3][c + 1]],
            ]);
            out.extend(&braille_utf8(mask))?;
        }
        out.push(b'\n')?;
    }
    Ok(())
}
