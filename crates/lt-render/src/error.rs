use lt_ascii::EncodeError;
use thiserror::Error;

/// Errors raised by a render session.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Encoding the frame failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing to the terminal failed.
    #[error("Erreur d'écriture terminal : {0}")]
    Io(#[from] std::io::Error),

    /// `render` called after `finish`.
    #[error("Session de rendu déjà terminée")]
    Finished,
}
