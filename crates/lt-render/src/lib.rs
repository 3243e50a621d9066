pub mod error;
pub mod fps;
/// Terminal output for lifeterm.
///
/// Drives an encoder against a sink, tracks frame rate and guards
/// terminal state.
pub mod session;
pub mod terminal;

pub use error::RenderError;
pub use fps::FpsCounter;
pub use session::RenderSession;
pub use terminal::TerminalGuard;
