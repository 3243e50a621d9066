use std::io::Write;

use lt_ascii::{FrameBuf, FrameEncoder};
use lt_core::board::Board;
use lt_core::config::Encoding;

use crate::error::RenderError;

/// Room reserved for the init/final hooks, on top of the frame itself.
const HOOK_HEADROOM: usize = 64;

/// Session de rendu : encodeur + buffer de sortie + sink.
///
/// Owns the single reusable output buffer. Each frame is encoded into it and
/// flushed to the sink with one `write_all`. `init` runs once before the first
/// frame; `finish` runs exactly once, either explicitly or on drop.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_render::session::RenderSession;
///
/// let board = Board::new(4, 4, Encoding::BigPixel);
/// let mut session = RenderSession::new(Encoding::BigPixel, 4, 4, Vec::new());
/// session.render(&board).unwrap();
/// session.finish().unwrap();
/// assert_eq!(session.frames(), 1);
/// assert!(session.writer().ends_with(b"\x1b[0m"));
/// ```
pub struct RenderSession<W: Write> {
    encoding: Encoding,
    buf: FrameBuf,
    writer: W,
    started: bool,
    finished: bool,
    frames: u64,
    bytes_written: u64,
}

impl<W: Write> RenderSession<W> {
    /// Size the output buffer for a `rows × cols` board in `encoding`.
    pub fn new(encoding: Encoding, rows: usize, cols: usize, writer: W) -> Self {
        let capacity = encoding.frame_capacity(rows, cols) + HOOK_HEADROOM;
        log::debug!("buffer de sortie {encoding} : {capacity} octets");
        Self {
            encoding,
            buf: FrameBuf::with_capacity(capacity),
            writer,
            started: false,
            finished: false,
            frames: 0,
            bytes_written: 0,
        }
    }

    /// Encoder in use.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Emit the encoder's init bytes. Later calls are no-ops.
    ///
    /// # Errors
    /// Returns an error if encoding or writing fails.
    pub fn init(&mut self) -> Result<(), RenderError> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.buf.clear();
        self.encoding.init(&mut self.buf)?;
        self.flush_buf()
    }

    /// Encode and write one frame. Runs [`init`](Self::init) first if needed.
    ///
    /// # Errors
    /// [`RenderError::Finished`] after [`finish`](Self::finish); otherwise
    /// encoding or I/O errors.
    pub fn render(&mut self, board: &Board) -> Result<(), RenderError> {
        if self.finished {
            return Err(RenderError::Finished);
        }
        self.init()?;
        self.buf.clear();
        self.encoding.render(board, &mut self.buf)?;
        self.flush_buf()?;
        self.frames += 1;
        Ok(())
    }

    /// Emit the encoder's final bytes, once. Later calls are no-ops.
    ///
    /// # Errors
    /// Returns an error if encoding or writing fails. The session counts as
    /// finished either way.
    pub fn finish(&mut self) -> Result<(), RenderError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.buf.clear();
        self.encoding.finish(&mut self.buf)?;
        self.flush_buf()
    }

    /// `true` once [`finish`](Self::finish) has run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frames written so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Bytes handed to the sink so far, hooks included.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The underlying sink.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn flush_buf(&mut self) -> Result<(), RenderError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.writer.write_all(self.buf.as_bytes())?;
        self.writer.flush()?;
        self.bytes_written += self.buf.len() as u64;
        Ok(())
    }
}

impl<W: Write> Drop for RenderSession<W> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            log::warn!("Restauration terminal incomplète : {e}");
        }
    }
}
