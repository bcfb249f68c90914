#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::{Cell, NUM_CELLS, SIZE};
use crate::csp::domain::Domain;
use crate::csp::error::{PuzzleError, PuzzleResult};
use crate::csp::graph::Peers;

/// The 9x9 grid as handed to the engine: integers 0..=9, 0 meaning empty.
pub type Givens = [[u8; SIZE]; SIZE];

/// The variable/domain model of one puzzle instance.
///
/// Holds the fixed givens, the assignment map built during search, and the
/// candidate domain of every cell. `assign`/`unassign` touch the assignment
/// only; domain edits belong to the propagators so they can be reverted
/// independently through the trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    values: [u8; NUM_CELLS],
    fixed: [bool; NUM_CELLS],
    domains: [Domain; NUM_CELLS],
    unassigned: usize,
}

impl Grid {
    /// Builds the model from the givens, rejecting invalid input before any
    /// search state exists: out-of-range values and fixed-cell conflicts.
    ///
    /// An empty cell left with no candidates is *not* an input error; the
    /// search reports it as unsolvable.
    ///
    /// # Errors
    ///
    /// `PuzzleError::ValueOutOfRange` or `PuzzleError::FixedConflict`.
    pub fn new(givens: &Givens, peers: &Peers) -> PuzzleResult<Self> {
        let mut values = [0u8; NUM_CELLS];
        let mut fixed = [false; NUM_CELLS];

        for cell in Cell::all() {
            let v = givens[cell.row()][cell.col()];
            if v > 9 {
                return Err(PuzzleError::ValueOutOfRange {
                    cell,
                    value: u32::from(v),
                });
            }
            values[cell.index()] = v;
            fixed[cell.index()] = v != 0;
        }

        for cell in Cell::all() {
            let v = values[cell.index()];
            if v == 0 {
                continue;
            }
            for &p in peers.of(cell) {
                if p > cell && values[p.index()] == v {
                    return Err(PuzzleError::FixedConflict {
                        first: cell,
                        second: p,
                        value: v,
                    });
                }
            }
        }

        let mut domains = [Domain::full(); NUM_CELLS];
        for cell in Cell::all() {
            if fixed[cell.index()] {
                domains[cell.index()] = Domain::singleton(values[cell.index()]);
            } else {
                for &p in peers.of(cell) {
                    let pv = values[p.index()];
                    if pv != 0 {
                        domains[cell.index()].remove(pv);
                    }
                }
            }
        }

        let unassigned = values.iter().filter(|&&v| v == 0).count();

        Ok(Self {
            values,
            fixed,
            domains,
            unassigned,
        })
    }

    #[must_use]
    pub const fn value(&self, cell: Cell) -> u8 {
        self.values[cell.index()]
    }

    #[must_use]
    pub const fn is_assigned(&self, cell: Cell) -> bool {
        self.values[cell.index()] != 0
    }

    #[must_use]
    pub const fn is_fixed(&self, cell: Cell) -> bool {
        self.fixed[cell.index()]
    }

    /// The candidate set of `cell`. Assigned and fixed cells report the
    /// singleton of their value, which is what arc revision wants to see.
    #[must_use]
    pub const fn domain(&self, cell: Cell) -> Domain {
        let v = self.values[cell.index()];
        if v != 0 {
            Domain::singleton(v)
        } else {
            self.domains[cell.index()]
        }
    }

    /// Records `value` in the assignment map. The cell's stored domain is
    /// left untouched so a later unassign restores it wholesale.
    pub const fn assign(&mut self, cell: Cell, value: u8) {
        debug_assert!(!self.is_assigned(cell));
        debug_assert!(value >= 1 && value <= 9);
        self.values[cell.index()] = value;
        self.unassigned -= 1;
    }

    pub const fn unassign(&mut self, cell: Cell) {
        debug_assert!(self.is_assigned(cell) && !self.is_fixed(cell));
        self.values[cell.index()] = 0;
        self.unassigned += 1;
    }

    /// Removes a candidate from an unassigned cell, returning whether it was
    /// present. Callers are responsible for trailing the removal.
    pub const fn remove_candidate(&mut self, cell: Cell, value: u8) -> bool {
        debug_assert!(!self.is_assigned(cell));
        self.domains[cell.index()].remove(value)
    }

    pub const fn restore_candidate(&mut self, cell: Cell, value: u8) {
        self.domains[cell.index()].insert(value);
    }

    #[must_use]
    pub const fn all_assigned(&self) -> bool {
        self.unassigned == 0
    }

    #[must_use]
    pub const fn unassigned_count(&self) -> usize {
        self.unassigned
    }

    pub fn unassigned_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(|&c| !self.is_assigned(c))
    }

    /// Whether no assigned peer already holds `value`.
    #[must_use]
    pub fn is_consistent(&self, peers: &Peers, cell: Cell, value: u8) -> bool {
        peers.of(cell).iter().all(|&p| self.value(p) != value)
    }

    /// The assigned peers currently holding `value`: the cells to blame
    /// when a consistency check rejects it.
    pub fn conflicting_peers<'a>(
        &'a self,
        peers: &'a Peers,
        cell: Cell,
        value: u8,
    ) -> impl Iterator<Item = Cell> + 'a {
        peers
            .of(cell)
            .iter()
            .copied()
            .filter(move |&p| self.value(p) == value)
    }

    #[must_use]
    pub fn to_givens(&self) -> Givens {
        let mut out = [[0u8; SIZE]; SIZE];
        for cell in Cell::all() {
            out[cell.row()][cell.col()] = self.values[cell.index()];
        }
        out
    }
}
