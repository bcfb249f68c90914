#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::Cell;
use crate::csp::graph::Peers;
use crate::csp::grid::Grid;
use clap::ValueEnum;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// A candidate ordering for one cell; at most nine values.
pub type ValueOrder = SmallVec<[u8; 9]>;

/// Orders the candidate values of the chosen cell. An ordering policy is
/// always active; `Ascending` is the fallback when LCV is disabled.
pub trait ValueOrdering {
    fn order(&self, grid: &Grid, peers: &Peers, cell: Cell) -> ValueOrder;
}

/// Least-constraining-value: try first the value that appears in the fewest
/// unassigned peer domains, preserving flexibility for the rest of the
/// search. Ties fall back to ascending numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lcv;

impl ValueOrdering for Lcv {
    fn order(&self, grid: &Grid, peers: &Peers, cell: Cell) -> ValueOrder {
        grid.domain(cell)
            .iter()
            .map(|v| {
                let hits = peers
                    .of(cell)
                    .iter()
                    .filter(|&&p| !grid.is_assigned(p) && grid.domain(p).contains(v))
                    .count();
                (hits, v)
            })
            .sorted()
            .map(|(_, v)| v)
            .collect()
    }
}

/// The fixed fallback order: candidates ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascending;

impl ValueOrdering for Ascending {
    fn order(&self, grid: &Grid, _peers: &Peers, cell: Cell) -> ValueOrder {
        grid.domain(cell).iter().collect()
    }
}

/// Runtime-selected value-ordering implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrderingImpls {
    Lcv(Lcv),
    Ascending(Ascending),
}

impl ValueOrdering for ValueOrderingImpls {
    fn order(&self, grid: &Grid, peers: &Peers, cell: Cell) -> ValueOrder {
        match self {
            Self::Lcv(o) => o.order(grid, peers, cell),
            Self::Ascending(o) => o.order(grid, peers, cell),
        }
    }
}

/// Command-line name for a value-ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueOrderingType {
    #[default]
    Lcv,
    Ascending,
}

impl ValueOrderingType {
    #[must_use]
    pub const fn to_impl(self) -> ValueOrderingImpls {
        match self {
            Self::Lcv => ValueOrderingImpls::Lcv(Lcv),
            Self::Ascending => ValueOrderingImpls::Ascending(Ascending),
        }
    }
}

impl fmt::Display for ValueOrderingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Ascending => write!(f, "ascending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::cell::SIZE;
    use crate::csp::grid::Givens;

    fn empty_grid(peers: &Peers) -> Grid {
        let givens: Givens = [[0; SIZE]; SIZE];
        Grid::new(&givens, peers).unwrap()
    }

    #[test]
    fn test_ascending_returns_domain_order() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let c = Cell::new(0, 0);
        grid.remove_candidate(c, 2);
        grid.remove_candidate(c, 8);
        let order = Ascending.order(&grid, &peers, c);
        assert_eq!(order.as_slice(), &[1, 3, 4, 5, 6, 7, 9]);
    }

    #[test]
    fn test_lcv_prefers_least_constraining() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let c = Cell::new(0, 0);

        // shrink c to {1, 2} and make 1 scarce among its peers
        for v in 3..=9 {
            grid.remove_candidate(c, v);
        }
        for &p in peers.of(c) {
            grid.remove_candidate(p, 1);
        }

        let order = Lcv.order(&grid, &peers, c);
        assert_eq!(order.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_lcv_ties_fall_back_to_ascending() {
        let peers = Peers::new();
        let grid = empty_grid(&peers);
        let order = Lcv.order(&grid, &peers, Cell::new(4, 4));
        assert_eq!(order.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }
}
