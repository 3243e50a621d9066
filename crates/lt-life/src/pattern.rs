//! Plain-text pattern files.
//!
//! ```text
//! 3 3
//! .O.
//! ..O
//! OOO
//! ```
//!
//! First line is `<rows> <cols>`. Then at most `rows` lines, at most `cols`
//! characters each. `O 0 o # * X` are alive, anything else is dead. Missing
//! lines and short lines are dead.

use std::path::Path;

use crate::error::LifeError;

/// Parsed pattern, coordinates relative to its own top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFile {
    /// Declared height.
    pub rows: usize,
    /// Declared width.
    pub cols: usize,
    /// Live cells `(row, col)`, row-major order.
    pub cells: Vec<(usize, usize)>,
}

#[inline]
fn is_alive(ch: char) -> bool {
    matches!(ch, 'O' | '0' | 'o' | '#' | '*' | 'X')
}

/// Parse pattern text.
///
/// # Errors
/// [`LifeError::Header`] for a missing or malformed size line, [`LifeError::RowTooLong`]
/// and [`LifeError::TooManyRows`] when the body overflows the declared size.
///
/// # Example
/// ```
/// use lt_life::pattern::parse_pattern;
/// let p = parse_pattern("2 2\nO.\n.O\n").unwrap();
/// assert_eq!(p.cells, vec![(0, 0), (1, 1)]);
/// ```
pub fn parse_pattern(text: &str) -> Result<PatternFile, LifeError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();

    let mut dims = header.split_whitespace().map(str::parse::<usize>);
    let (Some(Ok(rows)), Some(Ok(cols)), None) = (dims.next(), dims.next(), dims.next()) else {
        return Err(LifeError::Header(header.to_string()));
    };

    let mut cells = Vec::new();
    let mut body_rows = 0;
    for (r, line) in lines.enumerate() {
        let line = line.trim_end();
        if r >= rows {
            if line.is_empty() {
                continue;
            }
            return Err(LifeError::TooManyRows { rows });
        }
        let len = line.chars().count();
        if len > cols {
            return Err(LifeError::RowTooLong {
                line: r + 2,
                len,
                cols,
            });
        }
        cells.extend(
            line.chars()
                .enumerate()
                .filter(|&(_, ch)| is_alive(ch))
                .map(|(c, _)| (r, c)),
        );
        body_rows = r + 1;
    }

    if body_rows < rows {
        log::debug!("motif {rows}×{cols} : {body_rows} lignes fournies, reste mort");
    }

    Ok(PatternFile { rows, cols, cells })
}

/// Read and parse a pattern file.
///
/// # Errors
/// [`LifeError::Io`] if the file cannot be read, otherwise as [`parse_pattern`].
pub fn load_pattern(path: &Path) -> Result<PatternFile, LifeError> {
    let text = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_pattern(&text)
}
