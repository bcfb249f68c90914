#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::Cell;
use crate::csp::grid::Grid;
use clap::ValueEnum;
use std::fmt;

/// Picks the next cell to branch on. A selection policy is always active;
/// `RowMajor` is the fallback when the MRV heuristic is disabled.
pub trait VariableSelection {
    fn pick(&self, grid: &Grid) -> Option<Cell>;
}

/// Minimum-remaining-values: the unassigned cell with the smallest domain,
/// ties broken by row-major position so runs are reproducible. Highly
/// constrained cells fail fast, exposing dead ends early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mrv;

impl VariableSelection for Mrv {
    fn pick(&self, grid: &Grid) -> Option<Cell> {
        let mut best: Option<(usize, Cell)> = None;
        for cell in grid.unassigned_cells() {
            let len = grid.domain(cell).len();
            // strict < keeps the first (row-major) cell on ties
            if best.is_none_or(|(b, _)| len < b) {
                best = Some((len, cell));
            }
        }
        best.map(|(_, c)| c)
    }
}

/// The fixed fallback order: first unassigned cell in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowMajor;

impl VariableSelection for RowMajor {
    fn pick(&self, grid: &Grid) -> Option<Cell> {
        grid.unassigned_cells().next()
    }
}

/// Runtime-selected variable-selection implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSelectionImpls {
    Mrv(Mrv),
    RowMajor(RowMajor),
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(&self, grid: &Grid) -> Option<Cell> {
        match self {
            Self::Mrv(s) => s.pick(grid),
            Self::RowMajor(s) => s.pick(grid),
        }
    }
}

/// Command-line name for a variable-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    Mrv,
    RowMajor,
}

impl VariableSelectionType {
    #[must_use]
    pub const fn to_impl(self) -> VariableSelectionImpls {
        match self {
            Self::Mrv => VariableSelectionImpls::Mrv(Mrv),
            Self::RowMajor => VariableSelectionImpls::RowMajor(RowMajor),
        }
    }
}

impl fmt::Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::RowMajor => write!(f, "row-major"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::cell::SIZE;
    use crate::csp::graph::Peers;
    use crate::csp::grid::Givens;

    fn empty_grid(peers: &Peers) -> Grid {
        let givens: Givens = [[0; SIZE]; SIZE];
        Grid::new(&givens, peers).unwrap()
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let tight = Cell::new(5, 5);
        for v in 1..=6 {
            grid.remove_candidate(tight, v);
        }
        assert_eq!(Mrv.pick(&grid), Some(tight));
    }

    #[test]
    fn test_mrv_breaks_ties_row_major() {
        let peers = Peers::new();
        let grid = empty_grid(&peers);
        // all domains are full, so the first cell wins
        assert_eq!(Mrv.pick(&grid), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_row_major_first_empty() {
        let peers = Peers::new();
        let mut givens: Givens = [[0; SIZE]; SIZE];
        givens[0][0] = 1;
        givens[0][1] = 2;
        let grid = Grid::new(&givens, &peers).unwrap();
        assert_eq!(RowMajor.pick(&grid), Some(Cell::new(0, 2)));
    }

    #[test]
    fn test_pick_none_when_complete() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        for cell in Cell::all() {
            grid.assign(cell, 1); // validity irrelevant here
        }
        assert_eq!(Mrv.pick(&grid), None);
        assert_eq!(RowMajor.pick(&grid), None);
    }
}
