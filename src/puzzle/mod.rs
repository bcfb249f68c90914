#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! The 9x9 board type the CLI works with: parsing, printing, validation and
//! a pair of built-in example puzzles.

use crate::csp::cell::{NUM_CELLS, SIZE};
use crate::csp::error::{PuzzleError, PuzzleResult};
use crate::csp::grid::Givens;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A classic easy puzzle; solvable by propagation with hardly any search.
pub const EASY: Givens = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Inkala's 2012 puzzle, notoriously search-heavy for backtracking solvers.
pub const HARD: Givens = [
    [8, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 3, 6, 0, 0, 0, 0, 0],
    [0, 7, 0, 0, 9, 0, 2, 0, 0],
    [0, 5, 0, 0, 0, 7, 0, 0, 0],
    [0, 0, 0, 0, 4, 5, 7, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 3, 0],
    [0, 0, 1, 0, 0, 0, 0, 6, 8],
    [0, 0, 8, 5, 0, 0, 0, 1, 0],
    [0, 9, 0, 0, 0, 0, 4, 0, 0],
];

/// A 9x9 board, blanks as zero. Constraint checking happens in the engine;
/// a `Board` only guarantees shape and character-level validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board(Givens);

impl Board {
    #[must_use]
    pub const fn new(givens: Givens) -> Self {
        Self(givens)
    }

    #[must_use]
    pub const fn givens(&self) -> &Givens {
        &self.0
    }

    /// Reads a board from a file: either nine lines of nine digits or the
    /// 81-character string form. Whitespace is insignificant.
    ///
    /// # Errors
    ///
    /// `PuzzleError::Io` if the file cannot be read, otherwise the parse
    /// errors of [`FromStr`].
    pub fn from_file(path: &Path) -> PuzzleResult<Self> {
        fs::read_to_string(path)?.parse()
    }

    /// Number of fixed cells.
    #[must_use]
    pub fn given_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Whether the board is a complete, rule-abiding solution: every row,
    /// column and box holds each of 1..=9 exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        let unit_ok = |unit: [u8; SIZE]| {
            let mut seen = [false; SIZE];
            for v in unit {
                if !(1..=9).contains(&v) || seen[v as usize - 1] {
                    return false;
                }
                seen[v as usize - 1] = true;
            }
            true
        };

        for i in 0..SIZE {
            let row = self.0[i];
            let col = std::array::from_fn(|j| self.0[j][i]);
            let boxed =
                std::array::from_fn(|j| self.0[(i / 3) * 3 + j / 3][(i % 3) * 3 + j % 3]);
            if !unit_ok(row) || !unit_ok(col) || !unit_ok(boxed) {
                return false;
            }
        }
        true
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    /// Accepts digits 1-9 for fixed cells and `0` or `.` for blanks; all
    /// whitespace is skipped. Exactly 81 cells must remain.
    fn from_str(s: &str) -> PuzzleResult<Self> {
        let mut cells = [0u8; NUM_CELLS];
        let mut count = 0;

        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let value = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                other => return Err(PuzzleError::BadCharacter(other)),
            };
            if count < NUM_CELLS {
                cells[count] = value;
            }
            count += 1;
        }

        if count != NUM_CELLS {
            return Err(PuzzleError::WrongNumberOfCells(count));
        }

        let givens = std::array::from_fn(|r| std::array::from_fn(|c| cells[r * SIZE + c]));
        Ok(Self(givens))
    }
}

impl From<Givens> for Board {
    fn from(givens: Givens) -> Self {
        Self::new(givens)
    }
}

impl From<Board> for Givens {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i % 3 == 0 && i != 0 {
                writeln!(f, "- - - - - - - - - - - -")?;
            }
            for (j, &v) in row.iter().enumerate() {
                if j % 3 == 0 && j != 0 {
                    write!(f, "| ")?;
                }
                if j == SIZE - 1 {
                    writeln!(f, "{v}")?;
                } else {
                    write!(f, "{v} ")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY_TEXT: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_parse_dot_string() {
        let board: Board = EASY_TEXT.parse().unwrap();
        assert_eq!(board, Board::new(EASY));
    }

    #[test]
    fn test_parse_line_format() {
        let text = EASY
            .map(|row| row.map(|v| v.to_string()).join(" "))
            .join("\n");
        let board: Board = text.parse().unwrap();
        assert_eq!(board, Board::new(EASY));
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let text = EASY_TEXT.replace('7', "x");
        assert!(matches!(
            text.parse::<Board>(),
            Err(PuzzleError::BadCharacter('x'))
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_cell_count() {
        assert!(matches!(
            "123".parse::<Board>(),
            Err(PuzzleError::WrongNumberOfCells(3))
        ));
        let long = format!("{EASY_TEXT}1");
        assert!(matches!(
            long.parse::<Board>(),
            Err(PuzzleError::WrongNumberOfCells(82))
        ));
    }

    #[test]
    fn test_display_has_box_rules() {
        let rendered = Board::new(EASY).to_string();
        assert_eq!(rendered.lines().count(), 11);
        assert_eq!(
            rendered.lines().nth(3),
            Some("- - - - - - - - - - - -")
        );
        assert!(rendered.lines().next().is_some_and(|l| l.contains('|')));
    }

    #[test]
    fn test_validates_a_real_solution() {
        let solved: Givens = [
            [5, 3, 4, 6, 7, 8, 9, 1, 2],
            [6, 7, 2, 1, 9, 5, 3, 4, 8],
            [1, 9, 8, 3, 4, 2, 5, 6, 7],
            [8, 5, 9, 7, 6, 1, 4, 2, 3],
            [4, 2, 6, 8, 5, 3, 7, 9, 1],
            [7, 1, 3, 9, 2, 4, 8, 5, 6],
            [9, 6, 1, 5, 3, 7, 2, 8, 4],
            [2, 8, 7, 4, 1, 9, 6, 3, 5],
            [3, 4, 5, 2, 8, 6, 1, 7, 9],
        ];
        assert!(Board::new(solved).is_valid_solution());

        let mut broken = solved;
        broken[0][0] = broken[0][1];
        assert!(!Board::new(broken).is_valid_solution());

        // incomplete boards never validate
        assert!(!Board::new(EASY).is_valid_solution());
    }

    #[test]
    fn test_given_counts() {
        assert_eq!(Board::new(EASY).given_count(), 30);
        assert_eq!(Board::new(HARD).given_count(), 21);
    }
}
