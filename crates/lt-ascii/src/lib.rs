pub mod ascii;
pub mod braille;
/// Frame encoders for lifeterm.
///
/// Packs a cell grid into terminal byte streams: plain characters,
/// Braille glyphs, truecolor half-blocks or Sixel bands.
pub mod encoder;
pub mod error;
pub mod halfblock;
pub mod output;
pub mod sixel;

pub use encoder::FrameEncoder;
pub use error::EncodeError;
pub use output::FrameBuf;
