use lt_core::board::Board;

/// Moteur de mise à jour Life, règle « murée » (pas de wraparound).
///
/// Owns the neighbour-sum accumulator. Each [`advance`](Self::advance) first
/// scatters the 8-neighbour count of every interior cell into the accumulator,
/// then applies `B3/S23` to the whole buffer and zeroes the accumulator again.
/// Border and padding cells never receive a count, so they always come out dead.
///
/// # Example
/// ```
/// use lt_core::{Board, Encoding};
/// use lt_life::automaton::Automaton;
///
/// // Blinker
/// let mut board = Board::new(5, 5, Encoding::Ascii);
/// for c in 1..4 {
///     board.set(2, c, true);
/// }
/// let mut life = Automaton::new(&board);
/// life.advance(&mut board);
/// assert!(board.get(1, 2) && board.get(2, 2) && board.get(3, 2));
/// assert!(!board.get(2, 1) && !board.get(2, 3));
/// assert_eq!(life.generation(), 1);
/// ```
pub struct Automaton {
    /// Same shape as the board's padded buffer. All zero between calls.
    sum: Vec<u8>,
    generation: u64,
}

impl Automaton {
    /// Pre-allocate the accumulator for `board`.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            sum: vec![0u8; board.cells().len()],
            generation: 0,
        }
    }

    /// Number of `advance` calls so far.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compute the next generation in place.
    ///
    /// Allocation-free as long as `board` keeps the shape it was created with.
    pub fn advance(&mut self, board: &mut Board) {
        let len = board.cells().len();
        if self.sum.len() != len {
            log::debug!("accumulateur redimensionné : {} -> {len}", self.sum.len());
            self.sum.clear();
            self.sum.resize(len, 0);
        }

        self.scatter(board);

        for (cell, sum) in board.cells_mut().iter_mut().zip(self.sum.iter_mut()) {
            *cell = u8::from((*sum == 2 && *cell != 0) || *sum == 3);
            *sum = 0;
        }
        self.generation += 1;
    }

    /// Add each interior cell's live neighbours into the accumulator.
    fn scatter(&mut self, board: &Board) {
        let rows = board.rows();
        let cols = board.cols();
        if rows < 3 || cols < 3 {
            return;
        }
        let stride = board.padded_cols();
        let cells = board.cells();

        for i in 1..rows - 1 {
            let prev = &cells[(i - 1) * stride..i * stride];
            let curr = &cells[i * stride..(i + 1) * stride];
            let next = &cells[(i + 1) * stride..(i + 2) * stride];
            let acc = &mut self.sum[i * stride..(i + 1) * stride];

            for j in 1..cols - 1 {
                acc[j] += prev[j - 1]
                    + prev[j]
                    + prev[j + 1]
                    + curr[j - 1]
                    + curr[j + 1]
                    + next[j - 1]
                    + next[j]
                    + next[j + 1];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_core::Encoding;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board_from_bits(rows: usize, cols: usize, bits: u32) -> Board {
        let mut board = Board::new(rows, cols, Encoding::Ascii);
        for r in 0..rows {
            for c in 0..cols {
                board.set(r, c, bits >> (r * cols + c) & 1 == 1);
            }
        }
        board
    }

    fn live_neighbours(board: &Board, r: usize, c: usize) -> usize {
        let mut n = 0;
        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let rr = r.checked_add_signed(dr).unwrap();
                let cc = c.checked_add_signed(dc).unwrap();
                n += usize::from(board.get(rr, cc));
            }
        }
        n
    }

    fn check_rule_exhaustively(rows: usize, cols: usize) {
        let mut scratch = Board::new(rows, cols, Encoding::Ascii);
        let mut life = Automaton::new(&scratch);
        for bits in 0..1u32 << (rows * cols) {
            let before = board_from_bits(rows, cols, bits);
            scratch.clone_from(&before);
            life.advance(&mut scratch);

            for r in 0..rows {
                for c in 0..cols {
                    let interior = r > 0 && r < rows - 1 && c > 0 && c < cols - 1;
                    let expected = interior && {
                        let n = live_neighbours(&before, r, c);
                        n == 3 || (n == 2 && before.get(r, c))
                    };
                    assert_eq!(
                        scratch.get(r, c),
                        expected,
                        "{rows}×{cols} motif {bits:#b}, cellule ({r}, {c})"
                    );
                }
            }
        }
    }

    #[test]
    fn rule_exhaustive_3x3() {
        check_rule_exhaustively(3, 3);
    }

    #[test]
    fn rule_exhaustive_4x4() {
        check_rule_exhaustively(4, 4);
    }

    #[test]
    fn borders_die_for_every_size() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for rows in 3..10 {
            for cols in 3..10 {
                for encoding in Encoding::ALL {
                    let mut board = Board::new(rows, cols, encoding);
                    for r in 0..rows {
                        for c in 0..cols {
                            board.set(r, c, rng.gen_bool(0.6));
                        }
                    }
                    let mut life = Automaton::new(&board);
                    for _ in 0..3 {
                        life.advance(&mut board);
                        for c in 0..board.padded_cols() {
                            assert!(!board.get(0, c));
                            assert!(!board.get(rows - 1, c));
                        }
                        for r in 0..board.padded_rows() {
                            assert!(!board.get(r, 0));
                            assert!(!board.get(r, cols - 1));
                        }
                        for r in rows..board.padded_rows() {
                            assert!(board.row(r).iter().all(|&v| v == 0), "padding vivante");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn glider_first_step() {
        let mut board = Board::new(10, 10, Encoding::Ascii);
        for &(r, c) in crate::seed::GLIDER.cells {
            board.set(r, c, true);
        }
        let mut life = Automaton::new(&board);
        life.advance(&mut board);

        let mut alive = Vec::new();
        for r in 0..10 {
            for c in 0..10 {
                if board.get(r, c) {
                    alive.push((r, c));
                }
            }
        }
        assert_eq!(alive, vec![(3, 2), (3, 4), (4, 3), (4, 4), (5, 3)]);
    }

    #[test]
    fn glider_returns_to_shape_shifted_after_four_steps() {
        let mut board = Board::new(12, 12, Encoding::Braille);
        for &(r, c) in crate::seed::GLIDER.cells {
            board.set(r, c, true);
        }
        let mut life = Automaton::new(&board);
        for _ in 0..4 {
            life.advance(&mut board);
        }
        for &(r, c) in crate::seed::GLIDER.cells {
            assert!(board.get(r + 1, c + 1));
        }
        assert_eq!(board.population(), 5);
    }

    #[test]
    fn tiny_boards_clear_out() {
        for (rows, cols) in [(1, 1), (2, 2), (1, 8), (8, 2)] {
            let mut board = Board::new(rows, cols, Encoding::Ascii);
            for r in 0..rows {
                for c in 0..cols {
                    board.set(r, c, true);
                }
            }
            let mut life = Automaton::new(&board);
            life.advance(&mut board);
            assert_eq!(board.population(), 0, "{rows}×{cols}");
        }
    }

    #[test]
    fn accumulator_is_zero_between_steps() {
        let mut board = board_from_bits(4, 4, 0b0110_0110_0110_0000);
        let mut life = Automaton::new(&board);
        life.advance(&mut board);
        assert!(life.sum.iter().all(|&s| s == 0));
    }
}
