//! Terminal state around a run: clear + hidden cursor on entry, cursor back on exit.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor, terminal};
use lt_core::config::{Encoding, MAX_DIMENSION};

/// Hides the cursor for the lifetime of the guard.
///
/// The cursor is shown again on [`restore`](Self::restore) or on drop,
/// whichever comes first.
pub struct TerminalGuard<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Clear the screen and hide the cursor.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    pub fn enter(mut out: W) -> io::Result<Self> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.queue(cursor::Hide)?;
        out.flush()?;
        Ok(Self { out, active: true })
    }

    /// Show the cursor again. Later calls are no-ops.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.out.queue(cursor::Show)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Impossible de réafficher le curseur : {e}");
        }
    }
}

/// Board size that fills a `term_cols × term_rows` terminal in `encoding`.
///
/// One terminal row is kept free so the last frame line does not scroll.
/// Sixel works in pixels and needs the window's pixel size (`px_w × px_h`);
/// `None` when that is unknown or when nothing fits.
///
/// # Example
/// ```
/// use lt_core::Encoding;
/// use lt_render::terminal::fit_dimensions;
///
/// assert_eq!(fit_dimensions(Encoding::Braille, 80, 25, 0, 0), Some((96, 160)));
/// assert_eq!(fit_dimensions(Encoding::Sixel, 80, 25, 0, 0), None);
/// ```
#[must_use]
pub fn fit_dimensions(
    encoding: Encoding,
    term_cols: u16,
    term_rows: u16,
    px_w: u16,
    px_h: u16,
) -> Option<(usize, usize)> {
    let cols = usize::from(term_cols);
    let rows = usize::from(term_rows).saturating_sub(1);
    let (r, c) = match encoding {
        Encoding::Ascii => (rows, cols),
        Encoding::Braille => (rows * 4, cols * 2),
        Encoding::BigPixel => (rows * 2, cols),
        Encoding::Sixel => {
            if px_w == 0 || px_h == 0 || term_rows == 0 {
                return None;
            }
            let cell_h = usize::from(px_h) / usize::from(term_rows);
            // strips are 6 px high; stay below the free text row
            let usable = (usize::from(px_h) - cell_h) / 6 * 6;
            (usable, usize::from(px_w))
        }
    };
    (r > 0 && c > 0).then_some((r.min(MAX_DIMENSION), c.min(MAX_DIMENSION)))
}

/// [`fit_dimensions`] applied to the current terminal.
///
/// # Errors
/// Returns an error if the terminal size cannot be queried.
pub fn fit_to_terminal(encoding: Encoding) -> io::Result<Option<(usize, usize)>> {
    let size = terminal::window_size()?;
    log::debug!(
        "terminal {}×{} cellules, {}×{} px",
        size.columns,
        size.rows,
        size.width,
        size.height
    );
    Ok(fit_dimensions(
        encoding,
        size.columns,
        size.rows,
        size.width,
        size.height,
    ))
}
