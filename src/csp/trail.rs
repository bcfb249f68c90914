#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::Cell;
use crate::csp::grid::Grid;

/// One tentative assignment together with every domain removal the
/// propagators caused for it, so the whole effect can be undone precisely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    pub cell: Cell,
    pub value: u8,
    pub removals: Vec<(Cell, u8)>,
}

impl Step {
    #[must_use]
    pub const fn new(cell: Cell, value: u8) -> Self {
        Self {
            cell,
            value,
            removals: Vec::new(),
        }
    }
}

/// The ordered sequence of search assignments. Backtracking is a
/// pop-and-undo over this structure rather than implicit call-stack state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, cell: Cell, value: u8) {
        self.steps.push(Step::new(cell, value));
    }

    /// Records a domain removal against the current step. With no step open
    /// (the initial propagation pass, depth zero) the removal is permanent
    /// and deliberately not recorded.
    pub fn record(&mut self, cell: Cell, value: u8) {
        if let Some(step) = self.steps.last_mut() {
            step.removals.push((cell, value));
        }
    }

    /// The cell of the most recent assignment, if any.
    #[must_use]
    pub fn last_cell(&self) -> Option<Cell> {
        self.steps.last().map(|s| s.cell)
    }

    /// Assigned cells, most recent first, which is the order the backjump
    /// target scan wants.
    pub fn cells_newest_first(&self) -> impl Iterator<Item = Cell> + '_ {
        self.steps.iter().rev().map(|s| s.cell)
    }

    /// Undoes the most recent assignment: restores every recorded domain
    /// removal in reverse order, then clears the assignment itself.
    pub fn undo_last(&mut self, grid: &mut Grid) -> Option<Cell> {
        let step = self.steps.pop()?;
        for &(cell, value) in step.removals.iter().rev() {
            grid.restore_candidate(cell, value);
        }
        grid.unassign(step.cell);
        Some(step.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::cell::SIZE;
    use crate::csp::domain::Domain;
    use crate::csp::graph::Peers;
    use crate::csp::grid::Givens;

    fn empty_grid(peers: &Peers) -> Grid {
        let givens: Givens = [[0; SIZE]; SIZE];
        Grid::new(&givens, peers).unwrap()
    }

    #[test]
    fn test_undo_restores_removals_and_assignment() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let c = Cell::new(0, 0);
        let p = Cell::new(0, 5);

        grid.assign(c, 4);
        let mut trail = Trail::new();
        trail.push(c, 4);

        assert!(grid.remove_candidate(p, 4));
        trail.record(p, 4);

        assert_eq!(trail.undo_last(&mut grid), Some(c));
        assert!(!grid.is_assigned(c));
        assert_eq!(grid.domain(p), Domain::full());
        assert!(trail.is_empty());
    }

    #[test]
    fn test_record_without_step_is_permanent() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let p = Cell::new(3, 3);

        let mut trail = Trail::new();
        grid.remove_candidate(p, 9);
        trail.record(p, 9);

        assert!(trail.is_empty());
        assert!(!grid.domain(p).contains(9));
    }

    #[test]
    fn test_cells_newest_first() {
        let peers = Peers::new();
        let mut grid = empty_grid(&peers);
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 1);

        let mut trail = Trail::new();
        grid.assign(a, 1);
        trail.push(a, 1);
        grid.assign(b, 2);
        trail.push(b, 2);

        let order: Vec<_> = trail.cells_newest_first().collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(trail.last_cell(), Some(b));
    }
}
