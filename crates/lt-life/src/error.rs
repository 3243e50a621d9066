use thiserror::Error;

/// Errors raised while seeding a board.
#[derive(Error, Debug)]
pub enum LifeError {
    /// Pattern file could not be read.
    #[error("Impossible de lire le motif {path} : {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// First line is not `<rows> <cols>`.
    #[error("En-tête de motif invalide : {0:?} (attendu \"<rows> <cols>\")")]
    Header(String),

    /// A pattern line is wider than the declared width.
    #[error("Ligne {line} du motif : {len} colonnes pour une largeur de {cols}")]
    RowTooLong {
        /// 1-based line number in the file.
        line: usize,
        /// Characters found.
        len: usize,
        /// Declared width.
        cols: usize,
    },

    /// More non-empty lines than the declared height.
    #[error("Motif trop haut : plus de {rows} lignes")]
    TooManyRows {
        /// Declared height.
        rows: usize,
    },
}
