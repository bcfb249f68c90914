#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::cell::Cell;
use crate::csp::conflict::ConflictSets;
use crate::csp::graph::Peers;
use crate::csp::grid::Grid;
use crate::csp::trail::Trail;
use bit_vec::BitVec;
use std::collections::VecDeque;

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Consistent,
    /// Some unassigned cell's domain became empty.
    Wipeout(Cell),
}

/// A constraint propagator triggered by a tentative assignment.
///
/// Every domain removal is recorded on the trail's current step and blamed
/// into the affected cell's conflict set; on `Wipeout` the engine undoes the
/// whole step through the trail.
pub trait Propagator {
    fn propagate(
        &mut self,
        grid: &mut Grid,
        peers: &Peers,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
        cell: Cell,
        value: u8,
    ) -> Propagation;

    /// Total domain removals performed so far.
    fn removals(&self) -> usize;
}

/// Forward checking: prune the just-assigned value from every unassigned
/// peer, failing as soon as any peer's domain runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForwardChecking {
    removed: usize,
}

impl ForwardChecking {
    #[must_use]
    pub const fn new() -> Self {
        Self { removed: 0 }
    }
}

impl Propagator for ForwardChecking {
    fn propagate(
        &mut self,
        grid: &mut Grid,
        peers: &Peers,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
        cell: Cell,
        value: u8,
    ) -> Propagation {
        for &p in peers.of(cell) {
            if grid.is_assigned(p) {
                continue;
            }
            if grid.remove_candidate(p, value) {
                trail.record(p, value);
                conflicts.blame(p, cell);
                self.removed += 1;

                if grid.domain(p).is_empty() {
                    // short-circuit: the assignment is about to be undone,
                    // so the remaining peers do not matter
                    return Propagation::Wipeout(p);
                }
            }
        }
        Propagation::Consistent
    }

    fn removals(&self) -> usize {
        self.removed
    }
}

/// AC-3: worklist-driven arc revision. Under the not-equal constraint a
/// value `v` of X is unsupported by Y exactly when Y's domain is the
/// singleton `{v}`, so revision reduces to a singleton check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ac3 {
    queue: VecDeque<(Cell, Cell)>,
    enqueued: BitVec,
    removed: usize,
}

impl Ac3 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            enqueued: BitVec::from_elem(Peers::arc_count(), false),
            removed: 0,
        }
    }

    fn enqueue(&mut self, x: Cell, y: Cell) {
        let id = Peers::arc_id(x, y);
        if !self.enqueued.get(id).unwrap_or(false) {
            self.enqueued.set(id, true);
            self.queue.push_back((x, y));
        }
    }

    fn pop(&mut self) -> Option<(Cell, Cell)> {
        let (x, y) = self.queue.pop_front()?;
        self.enqueued.set(Peers::arc_id(x, y), false);
        Some((x, y))
    }

    /// Removes from X's domain any value with no support in Y's domain,
    /// returning whether the domain changed.
    fn revise(
        &mut self,
        grid: &mut Grid,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
        x: Cell,
        y: Cell,
    ) -> bool {
        let Some(v) = grid.domain(y).single() else {
            return false;
        };
        if grid.remove_candidate(x, v) {
            trail.record(x, v);
            conflicts.blame(x, y);
            if !grid.is_assigned(y) {
                // a revision against an unassigned singleton must carry that
                // cell's own culprits along, or the blame chain would dead-end
                // in a cell no jump can target
                conflicts.absorb(x, y);
            }
            self.removed += 1;
            true
        } else {
            false
        }
    }

    fn drain(
        &mut self,
        grid: &mut Grid,
        peers: &Peers,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
    ) -> Propagation {
        while let Some((x, y)) = self.pop() {
            if self.revise(grid, trail, conflicts, x, y) {
                if grid.domain(x).is_empty() {
                    self.queue.clear();
                    self.enqueued.clear();
                    return Propagation::Wipeout(x);
                }
                // values removed from x may invalidate arcs into x
                for &z in peers.of(x) {
                    if z != y && !grid.is_assigned(z) {
                        self.enqueue(z, x);
                    }
                }
            }
        }
        Propagation::Consistent
    }

    /// The initial graph-wide pass: every arc out of every unassigned cell.
    /// Called with an empty trail, so removals are permanent.
    pub fn propagate_all(
        &mut self,
        grid: &mut Grid,
        peers: &Peers,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
    ) -> Propagation {
        for x in Cell::all() {
            if grid.is_assigned(x) {
                continue;
            }
            for &y in peers.of(x) {
                self.enqueue(x, y);
            }
        }
        self.drain(grid, peers, trail, conflicts)
    }
}

impl Default for Ac3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Propagator for Ac3 {
    fn propagate(
        &mut self,
        grid: &mut Grid,
        peers: &Peers,
        trail: &mut Trail,
        conflicts: &mut ConflictSets,
        cell: Cell,
        _value: u8,
    ) -> Propagation {
        // seed with every arc pointing at the freshly constrained cell
        for &x in peers.of(cell) {
            if !grid.is_assigned(x) {
                self.enqueue(x, cell);
            }
        }
        self.drain(grid, peers, trail, conflicts)
    }

    fn removals(&self) -> usize {
        self.removed
    }
}
