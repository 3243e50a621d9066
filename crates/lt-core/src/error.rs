use thiserror::Error;

/// Erreurs de configuration, rejetées avant le démarrage de la boucle.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Out-of-range fps or fraction.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// `--config` points nowhere.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        path: String,
    },

    /// Unknown encoding selector.
    #[error("Encodage non supporté : {format} (ascii, braille, bigpixel, sixel)")]
    UnsupportedEncoding {
        /// The selector that was rejected.
        format: String,
    },

    /// Invalid rows/cols dimensions.
    #[error("Dimensions invalides : {rows}×{cols}")]
    InvalidDimensions {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },
}
