use lt_core::board::Board;

use crate::error::EncodeError;
use crate::output::{CURSOR_HOME, FrameBuf};

/// Couleur RGB 24 bits.
pub type Rgb = (u8, u8, u8);

/// Live cells.
pub const ALIVE: Rgb = (255, 255, 255);
/// Dead cells.
pub const DEAD: Rgb = (0, 0, 0);

/// `▄` U+2584, lower half block.
pub const LOWER_HALF_BLOCK: [u8; 3] = [0xE2, 0x96, 0x84];

/// Longest SGR colour escape: `ESC[38;2;255;255;255m`.
const SGR_RGB_MAX: usize = 19;

/// Worst case per glyph: a fg change, a bg change and the glyph itself.
const CELL_MAX: usize = 2 * SGR_RGB_MAX + LOWER_HALF_BLOCK.len();

/// Worst-case frame size for a board already padded to `rows × cols`.
#[must_use]
pub fn frame_capacity(rows: usize, cols: usize) -> usize {
    CURSOR_HOME.len() + (rows / 2) * (cols * CELL_MAX + 1)
}

#[inline(always)]
fn cell_color(cell: u8) -> Rgb {
    if cell != 0 { ALIVE } else { DEAD }
}

/// Couleurs courantes du terminal pendant une passe d'encodage.
///
/// Starts empty so the first glyph always emits both escapes.
#[derive(Default)]
struct ColorCache {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

/// `ESC[<selector>;2;R;G;Bm`, selector `38` (fg) or `48` (bg).
fn push_rgb(out: &mut FrameBuf, selector: &[u8], (r, g, b): Rgb) -> Result<(), EncodeError> {
    out.extend(b"\x1b[")?;
    out.extend(selector)?;
    out.extend(b";2;")?;
    out.push_decimal(usize::from(r))?;
    out.push(b';')?;
    out.push_decimal(usize::from(g))?;
    out.push(b';')?;
    out.push_decimal(usize::from(b))?;
    out.push(b'm')
}

/// Encode the padded board in half-block mode (▄ character).
///
/// Each glyph covers 2 vertical cells. The top cell's colour goes to bg,
/// the bottom cell's colour goes to fg. Colour escapes are only emitted
/// when the colour differs from the one already active.
///
/// The caller guarantees `padded_rows % 2 == 0`.
///
/// # Errors
/// [`EncodeError::Overflow`] if `out` is too small.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_ascii::halfblock::{encode_halfblock, frame_capacity};
/// use lt_ascii::output::FrameBuf;
///
/// let mut board = Board::new(2, 1, Encoding::BigPixel);
/// board.set(0, 0, true);
/// let mut out = FrameBuf::with_capacity(frame_capacity(2, 1));
/// encode_halfblock(&board, &mut out).unwrap();
/// assert_eq!(
///     out.as_bytes(),
///     "\x1b[1;1H\x1b[38;2;0;0;0m\x1b[48;2;255;255;255m\u{2584}\n".as_bytes()
/// );
/// ```
pub fn encode_halfblock(board: &Board, out: &mut FrameBuf) -> Result<(), EncodeError> {
    out.extend(CURSOR_HOME)?;
    let mut cache = ColorCache::default();

    for r in (0..board.padded_rows()).step_by(2) {
        let top = board.row(r);
        let bottom = board.row(r + 1);
        for (&t, &b) in top.iter().zip(bottom) {
            let fg = cell_color(b);
            if cache.fg != Some(fg) {
                push_rgb(out, b"38", fg)?;
                cache.fg = Some(fg);
            }
            let bg = cell_color(t);
            if cache.bg != Some(bg) {
                push_rgb(out, b"48", bg)?;
                cache.bg = Some(bg);
            }
            out.extend(&LOWER_HALF_BLOCK)?;
        }
        out.push(b'\n')?;
    }
    Ok(())
}
