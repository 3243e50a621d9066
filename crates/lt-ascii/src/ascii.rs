use lt_core::board::Board;

use crate::error::EncodeError;
use crate::output::{CURSOR_HOME, FrameBuf};

/// Worst-case frame size: one byte per cell plus a newline per row.
#[must_use]
pub fn frame_capacity(rows: usize, cols: usize) -> usize {
    CURSOR_HOME.len() + rows * (cols + 1)
}

/// Encode one byte per cell: `'0'` alive, `' '` dead, `'\n'` after each row.
///
/// # Errors
/// [`EncodeError::Overflow`] if `out` is too small.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_ascii::ascii::{encode_ascii, frame_capacity};
/// use lt_ascii::output::FrameBuf;
///
/// let mut board = Board::new(2, 3, Encoding::Ascii);
/// board.set(0, 1, true);
/// let mut out = FrameBuf::with_capacity(frame_capacity(2, 3));
/// encode_ascii(&board, &mut out).unwrap();
/// assert_eq!(out.as_bytes(), b"\x1b[1;1H 0 \n   \n");
/// ```
pub fn encode_ascii(board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError> {
    out.extend(CURSOR_HOME)?;
    for r in 0..board.rows() {
        for &cell in &board.row(r)[..board.cols()] {
            out.push(if cell != 0 { b'0' } else { b' ' })?;
        }
        out.push(b'\n')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_core::Encoding;

    #[test]
    fn full_frame_fills_capacity_exactly() {
        let mut board = Board::new(3, 4, Encoding::Ascii);
        for r in 0..3usize {
            for c in 0..4 {
                board.set(r, c, (r + c).is_multiple_of(2));
            }
        }
        let mut out = FrameBuf::with_capacity(frame_capacity(3, 4));
        encode_ascii(&board, &mut out).unwrap();
        assert_eq!(out.len(), out.capacity());
        assert_eq!(&out.as_bytes()[6..], b"0 0 \n 0 0\n0 0 \n");
    }

    #[test]
    fn ignores_padding_columns() {
        let mut board = Board::new(2, 3, Encoding::Braille);
        board.set(1, 2, true);
        let mut out = FrameBuf::with_capacity(frame_capacity(2, 3));
        encode_ascii(&board, &mut out).unwrap();
        assert_eq!(&out.as_bytes()[6..], b"   \n  0\n");
    }

    #[test]
    fn undersized_buffer_overflows() {
        let board = Board::new(4, 4, Encoding::Ascii);
        let mut out = FrameBuf::with_capacity(frame_capacity(4, 4) - 1);
        assert!(matches!(
            encode_ascii(&board, &mut out),
            Err(EncodeError::Overflow { .. })
        ));
    }
}
