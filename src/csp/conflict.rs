#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::{Cell, NUM_CELLS};
use rustc_hash::FxHashSet;

/// Per-cell blame sets: for each unassigned cell, the earlier-assigned
/// cells whose values contributed to shrinking its domain or to a
/// discovered failure. Owned by the search engine; the lifetime of this
/// state matches the search, not the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictSets {
    sets: Vec<FxHashSet<Cell>>,
}

impl ConflictSets {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: vec![FxHashSet::default(); NUM_CELLS],
        }
    }

    /// Blames `culprit` for a domain change or failure at `cell`.
    pub fn blame(&mut self, cell: Cell, culprit: Cell) {
        if cell != culprit {
            self.sets[cell.index()].insert(culprit);
        }
    }

    /// Merges `source`'s conflict set into `target`'s, excluding `target`
    /// itself. This is how blame propagates upward on wipeouts and
    /// backjumps.
    pub fn absorb(&mut self, target: Cell, source: Cell) {
        if target == source {
            return;
        }
        let from = std::mem::take(&mut self.sets[source.index()]);
        for c in &from {
            if *c != target {
                self.sets[target.index()].insert(*c);
            }
        }
        self.sets[source.index()] = from;
    }

    #[must_use]
    pub fn contains(&self, cell: Cell, culprit: Cell) -> bool {
        self.sets[cell.index()].contains(&culprit)
    }

    #[must_use]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.sets[cell.index()].is_empty()
    }

    /// Forgets `cell`'s blame, once it has been handed to a jump target.
    pub fn clear(&mut self, cell: Cell) {
        self.sets[cell.index()].clear();
    }
}

impl Default for ConflictSets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blame_and_contains() {
        let mut cs = ConflictSets::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(5, 5);

        cs.blame(a, b);
        assert!(cs.contains(a, b));
        assert!(!cs.contains(b, a));
        assert!(!cs.is_empty(a));
    }

    #[test]
    fn test_blame_never_self() {
        let mut cs = ConflictSets::new();
        let a = Cell::new(2, 2);
        cs.blame(a, a);
        assert!(cs.is_empty(a));
    }

    #[test]
    fn test_absorb_excludes_target() {
        let mut cs = ConflictSets::new();
        let target = Cell::new(0, 0);
        let source = Cell::new(1, 1);
        let other = Cell::new(2, 2);

        cs.blame(source, target);
        cs.blame(source, other);
        cs.absorb(target, source);

        assert!(cs.contains(target, other));
        assert!(!cs.contains(target, target));
        // the source keeps its own set; clearing is a separate decision
        assert!(cs.contains(source, other));
    }

    #[test]
    fn test_clear() {
        let mut cs = ConflictSets::new();
        let a = Cell::new(3, 4);
        cs.blame(a, Cell::new(0, 4));
        cs.clear(a);
        assert!(cs.is_empty(a));
    }
}
