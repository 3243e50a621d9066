/// Configuration, board storage, and shared types for lifeterm.
///
/// This crate contains the types every other lifeterm crate agrees on:
/// the run configuration, the padded cell grid and the stop flag.

pub mod board;
pub mod config;
pub mod error;
pub mod stop;

pub use board::Board;
pub use config::{Encoding, RenderConfig};
pub use error::CoreError;
pub use stop::StopSignal;
