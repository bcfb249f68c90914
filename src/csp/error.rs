#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Error definitions for puzzle input. Everything here is raised before any
//! search state exists; propagation failures during search are ordinary
//! control flow and never surface as errors.

use crate::csp::cell::Cell;
use std::fmt;
use std::io;

/// An invalid puzzle input: malformed shape, out-of-range value, or a
/// constraint already violated among the fixed cells.
#[derive(Debug)]
pub enum PuzzleError {
    /// The textual form does not contain exactly 81 cells.
    WrongNumberOfCells(usize),

    /// A character in the textual form is not a digit, `.` or whitespace.
    BadCharacter(char),

    /// A cell holds a value outside 0..=9.
    ValueOutOfRange { cell: Cell, value: u32 },

    /// Two fixed cells sharing a row, column or box hold the same value.
    FixedConflict { first: Cell, second: Cell, value: u8 },

    /// The puzzle file could not be read.
    Io(io::Error),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongNumberOfCells(n) => {
                write!(f, "expected 81 cells, found {n}")
            }
            Self::BadCharacter(c) => {
                write!(f, "unexpected character {c:?} in puzzle input")
            }
            Self::ValueOutOfRange { cell, value } => {
                write!(f, "value {value} at {cell} is outside 0..=9")
            }
            Self::FixedConflict {
                first,
                second,
                value,
            } => {
                write!(f, "fixed cells {first} and {second} both hold {value}")
            }
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PuzzleError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Syntactic sugar for `Result<V, PuzzleError>`.
pub type PuzzleResult<V> = Result<V, PuzzleError>;
