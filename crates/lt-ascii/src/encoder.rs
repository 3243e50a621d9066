use lt_core::board::Board;
use lt_core::config::Encoding;

use crate::error::EncodeError;
use crate::output::{FrameBuf, SGR_RESET};
use crate::sixel::ST;
use crate::{ascii, braille, halfblock, sixel};

/// Sérialise une grille en flux terminal, avec hooks de cycle de vie.
///
/// Implemented for the closed [`Encoding`] enum: the variant is picked once at
/// startup and every call is a plain `match`.
///
/// Output is appended to `out`; the caller clears it between frames.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_ascii::encoder::FrameEncoder;
/// use lt_ascii::output::FrameBuf;
///
/// let board = Board::new(8, 8, Encoding::Braille);
/// let mut out = FrameBuf::with_capacity(Encoding::Braille.frame_capacity(8, 8));
/// Encoding::Braille.render(&board, &mut out).unwrap();
/// assert!(out.as_bytes().starts_with(b"\x1b[1;1H"));
/// ```
pub trait FrameEncoder {
    /// Worst-case size of one frame for a `rows × cols` logical board.
    fn frame_capacity(&self, rows: usize, cols: usize) -> usize;

    /// Bytes emitted once before the first frame.
    ///
    /// # Errors
    /// [`EncodeError::Overflow`] if `out` is too small.
    fn init(&self, out: &mut FrameBuf) -> Result<(), EncodeError>;

    /// One full frame.
    ///
    /// # Errors
    /// [`EncodeError::Unpadded`] if the board is not padded for this encoder,
    /// [`EncodeError::Overflow`] if `out` is too small.
    fn render(&self, board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError>;

    /// Bytes emitted once at shutdown to restore terminal state.
    ///
    /// # Errors
    /// [`EncodeError::Overflow`] if `out` is too small.
    fn finish(&self, out: &mut FrameBuf) -> Result<(), EncodeError>;
}

impl FrameEncoder for Encoding {
    fn frame_capacity(&self, rows: usize, cols: usize) -> usize {
        let (pr, pc) = self.padded(rows, cols);
        match self {
            Self::Ascii => ascii::frame_capacity(rows, cols),
            Self::Braille => braille::frame_capacity(pr, pc),
            Self::BigPixel => halfblock::frame_capacity(pr, pc),
            Self::Sixel => sixel::frame_capacity(pr, pc),
        }
    }

    fn init(&self, _out: &mut FrameBuf) -> Result<(), EncodeError> {
        // Aucun variant n'a besoin de préambule pour l'instant (palette sixel incluse par frame).
        Ok(())
    }

    fn render(&self, board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError> {
        if !board.fits(*self) {
            return Err(EncodeError::Unpadded {
                encoding: *self,
                rows: board.padded_rows(),
                cols: board.padded_cols(),
            });
        }
        match self {
            Self::Ascii => ascii::encode_ascii(board, out),
            Self::Braille => braille::encode_braille(board, out),
            Self::BigPixel => halfblock::encode_halfblock(board, out),
            Self::Sixel => sixel::encode_sixel(board, out),
        }
    }

    fn finish(&self, out: &mut FrameBuf) -> Result<(), EncodeError> {
        match self {
            Self::Ascii | Self::Braille => Ok(()),
            Self::BigPixel => out.extend(SGR_RESET),
            Self::Sixel => {
                out.extend(ST)?;
                out.extend(SGR_RESET)
            }
        }
    }
}
