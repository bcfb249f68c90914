#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::{Cell, NUM_CELLS};
use smallvec::SmallVec;

/// Inline peer list; every cell has exactly 20 peers.
pub type PeerList = SmallVec<[Cell; 20]>;

/// The static constraint graph: for every cell, the 20 cells it shares a
/// row, column or box with. Every peer pair carries an implicit not-equal
/// constraint, directed both ways for arc revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peers {
    table: Vec<PeerList>,
}

impl Peers {
    #[must_use]
    pub fn new() -> Self {
        let table = Cell::all()
            .map(|cell| Cell::all().filter(|&o| cell.is_peer_of(o)).collect())
            .collect();

        Self { table }
    }

    #[must_use]
    pub fn of(&self, cell: Cell) -> &[Cell] {
        &self.table[cell.index()]
    }

    /// A dense identifier for the directed arc `(x, y)`, used to index the
    /// AC-3 in-queue bitmap.
    #[must_use]
    pub const fn arc_id(x: Cell, y: Cell) -> usize {
        x.index() * NUM_CELLS + y.index()
    }

    /// Upper bound on `arc_id` values.
    #[must_use]
    pub const fn arc_count() -> usize {
        NUM_CELLS * NUM_CELLS
    }
}

impl Default for Peers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_has_twenty_peers() {
        let peers = Peers::new();
        for cell in Cell::all() {
            assert_eq!(peers.of(cell).len(), 20, "cell {cell}");
        }
    }

    #[test]
    fn test_peers_are_symmetric() {
        let peers = Peers::new();
        for cell in Cell::all() {
            for &p in peers.of(cell) {
                assert!(peers.of(p).contains(&cell));
            }
        }
    }

    #[test]
    fn test_peers_of_corner() {
        let peers = Peers::new();
        let corner = Cell::new(0, 0);
        let list = peers.of(corner);
        assert!(list.contains(&Cell::new(0, 8)));
        assert!(list.contains(&Cell::new(8, 0)));
        assert!(list.contains(&Cell::new(2, 2)));
        assert!(!list.contains(&Cell::new(3, 3)));
        assert!(!list.contains(&corner));
    }

    #[test]
    fn test_arc_ids_are_unique() {
        let peers = Peers::new();
        let mut seen = vec![false; Peers::arc_count()];
        for cell in Cell::all() {
            for &p in peers.of(cell) {
                let id = Peers::arc_id(cell, p);
                assert!(!seen[id]);
                seen[id] = true;
            }
        }
    }
}
