use lt_core::board::Board;
use lt_core::config::RenderConfig;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::LifeError;
use crate::pattern;

/// Motif statique : liste de cellules vivantes `(row, col)`.
pub struct Pattern {
    /// Display name, for logs.
    pub name: &'static str,
    /// Live cells, absolute board coordinates.
    pub cells: &'static [(usize, usize)],
}

/// Default seed: a glider heading down-right, two cells in from the top-left.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(2, 3), (3, 4), (4, 2), (4, 3), (4, 4)],
};

/// Stamp `cells` onto `board`, shifted by `offset`.
///
/// Returns how many cells were clipped because they fell outside the board.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_life::seed::{stamp, GLIDER};
/// let mut board = Board::new(4, 4, Encoding::Ascii);
/// let clipped = stamp(&mut board, GLIDER.cells.iter().copied(), (0, 0));
/// assert_eq!(clipped, 4);
/// assert_eq!(board.population(), 1);
/// ```
pub fn stamp(
    board: &mut Board,
    cells: impl IntoIterator<Item = (usize, usize)>,
    offset: (usize, usize),
) -> usize {
    let mut clipped = 0;
    for (r, c) in cells {
        if !board.set(r + offset.0, c + offset.1, true) {
            clipped += 1;
        }
    }
    clipped
}

/// Each logical cell alive with probability `fraction`, independently.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_life::seed::fill_random;
/// use rand::SeedableRng;
/// let mut board = Board::new(8, 8, Encoding::Ascii);
/// fill_random(&mut board, 1.0, &mut rand::rngs::StdRng::seed_from_u64(1));
/// assert_eq!(board.population(), 64);
/// ```
pub fn fill_random(board: &mut Board, fraction: f32, rng: &mut impl Rng) {
    let p = f64::from(fraction).clamp(0.0, 1.0);
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            board.set(r, c, rng.gen_bool(p));
        }
    }
}

/// Build the initial board described by `config`.
///
/// Priority: pattern file, then random fill, then the glider.
///
/// # Errors
/// Returns a [`LifeError`] if the pattern file cannot be read or parsed.
pub fn seed_board(config: &RenderConfig) -> Result<Board, LifeError> {
    let mut board = Board::new(config.rows, config.cols, config.encoding);

    if let Some(path) = config.pattern.as_deref() {
        let pattern = pattern::load_pattern(path)?;
        let clipped = stamp(&mut board, pattern.cells.iter().copied(), (1, 1));
        log::info!(
            "Motif {} ({}×{}) : {} cellules",
            path.display(),
            pattern.rows,
            pattern.cols,
            pattern.cells.len()
        );
        if clipped > 0 {
            log::warn!("Motif {} : {clipped} cellules hors grille ignorées", path.display());
        }
    } else if config.random_fill {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        fill_random(&mut board, config.random_fraction, &mut rng);
        log::info!(
            "Remplissage aléatoire p={} : {} cellules vivantes",
            config.random_fraction,
            board.population()
        );
    } else {
        let clipped = stamp(&mut board, GLIDER.cells.iter().copied(), (0, 0));
        if clipped > 0 {
            log::warn!(
                "{} tronqué sur une grille {}×{} ({clipped} cellules perdues)",
                GLIDER.name,
                config.rows,
                config.cols
            );
        }
    }

    Ok(board)
}
