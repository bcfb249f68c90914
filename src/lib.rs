//! This crate solves 9x9 Sudoku by treating it as a constraint satisfaction
//! problem: 81 variables with 1..=9 domains under pairwise not-equal
//! constraints, searched with forward checking, AC-3, MRV/LCV ordering and
//! conflict-directed backjumping. Each technique can be toggled
//! independently.

/// The `csp` module implements the constraint model and the search engine:
/// cells, domains, the peer graph, propagation, heuristics, the trail and
/// the conflict-directed backjumping solver.
pub mod csp;

/// The `puzzle` module implements the 9x9 board peripheral: parsing the two
/// text formats, pretty-printing, solution validation and example puzzles.
pub mod puzzle;
