use lt_core::Encoding;
use thiserror::Error;

/// Errors raised while encoding a frame.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The frame does not fit in the pre-allocated output buffer.
    #[error("Débordement du buffer de sortie ({capacity} octets)")]
    Overflow {
        /// Buffer capacity in bytes.
        capacity: usize,
    },

    /// The board's backing buffer is not a whole number of pixel groups.
    #[error("Grille {rows}×{cols} non paddée pour l'encodage {encoding}")]
    Unpadded {
        /// Encoder that rejected the board.
        encoding: Encoding,
        /// Padded rows of the board.
        rows: usize,
        /// Padded cols of the board.
        cols: usize,
    },
}
