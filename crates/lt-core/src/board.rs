use crate::config::Encoding;

/// Grille de cellules vivantes/mortes. Pré-allouée, jamais redimensionnée.
///
/// Stored row-major as one `u8` per cell (1 = alive, 0 = dead). The backing
/// buffer is padded up to the pixel-group shape of an encoding; padding cells
/// are never written through [`Board::set`] and stay dead.
///
/// # Example
/// ```
/// use lt_core::board::Board;
/// use lt_core::config::Encoding;
/// let mut board = Board::new(10, 10, Encoding::Braille);
/// assert_eq!(board.padded_rows(), 12);
/// board.set(2, 3, true);
/// assert!(board.get(2, 3));
/// assert_eq!(board.population(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
    padded_rows: usize,
    padded_cols: usize,
}

impl Board {
    /// Crée une grille morte, paddée pour `encoding`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, encoding: Encoding) -> Self {
        let (padded_rows, padded_cols) = encoding.padded(rows, cols);
        Self {
            cells: vec![0u8; padded_rows * padded_cols],
            rows,
            cols,
            padded_rows,
            padded_cols,
        }
    }

    /// Logical height.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Logical width.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height of the backing buffer.
    #[inline]
    #[must_use]
    pub fn padded_rows(&self) -> usize {
        self.padded_rows
    }

    /// Width of the backing buffer, i.e. the row stride.
    #[inline]
    #[must_use]
    pub fn padded_cols(&self) -> usize {
        self.padded_cols
    }

    /// `true` if the backing buffer is a whole number of `encoding` groups.
    #[must_use]
    pub fn fits(&self, encoding: Encoding) -> bool {
        let (gr, gc) = encoding.group();
        self.padded_rows.is_multiple_of(gr) && self.padded_cols.is_multiple_of(gc)
    }

    /// Cell value; anything outside the padded buffer reads as dead.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.padded_rows
            && col < self.padded_cols
            && self.cells[row * self.padded_cols + col] != 0
    }

    /// Set a logical cell. Returns `false` (and writes nothing) outside `rows × cols`.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.padded_cols + col] = u8::from(alive);
        true
    }

    /// One padded row, `padded_cols` cells wide.
    ///
    /// # Panics
    /// Panics if `row >= padded_rows`.
    #[inline(always)]
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.padded_cols;
        &self.cells[start..start + self.padded_cols]
    }

    /// Whole backing buffer, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable backing buffer, for the automaton.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}
