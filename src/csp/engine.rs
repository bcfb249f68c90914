#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! The conflict-directed backjumping search engine.
//!
//! The search loops over three states (select a cell, try its values under
//! the enabled propagators, backtrack on exhaustion) driven by an explicit
//! frame stack instead of recursion, so deep searches cannot blow the call
//! stack and undo is a pop over the trail.

use crate::csp::cell::Cell;
use crate::csp::conflict::ConflictSets;
use crate::csp::error::PuzzleResult;
use crate::csp::graph::Peers;
use crate::csp::grid::{Givens, Grid};
use crate::csp::propagation::{Ac3, ForwardChecking, Propagation, Propagator};
use crate::csp::solver::{Outcome, SearchConfig, SearchStats, Solver};
use crate::csp::trail::Trail;
use crate::csp::value_ordering::{ValueOrder, ValueOrdering, ValueOrderingImpls};
use crate::csp::variable_selection::{VariableSelection, VariableSelectionImpls};
use smallvec::SmallVec;

/// One open branching point: the chosen cell and its frozen value ordering.
/// Resuming a frame after a backjump continues with the next untried value
/// in the original order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    cell: Cell,
    values: ValueOrder,
    next: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Select,
    Try,
    Backtrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TryResult {
    Assigned,
    Exhausted,
}

/// The search engine: owns the grid, the trail, the conflict sets and the
/// configured strategies for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    grid: Grid,
    peers: Peers,
    trail: Trail,
    conflicts: ConflictSets,
    selector: VariableSelectionImpls,
    orderer: ValueOrderingImpls,
    forward_checking: Option<ForwardChecking>,
    ac3: Option<Ac3>,
    backjumping: bool,
    frames: Vec<Frame>,
    stats: SearchStats,
}

impl Engine {
    /// Validates the givens and builds a ready-to-run engine.
    ///
    /// # Errors
    ///
    /// `PuzzleError` if the input is malformed or the fixed cells already
    /// violate a constraint.
    pub fn new(givens: &Givens, config: &SearchConfig) -> PuzzleResult<Self> {
        let peers = Peers::new();
        let grid = Grid::new(givens, &peers)?;

        Ok(Self {
            grid,
            peers,
            trail: Trail::new(),
            conflicts: ConflictSets::new(),
            selector: config.variable_selection.to_impl(),
            orderer: config.value_ordering.to_impl(),
            forward_checking: config.forward_checking.then(ForwardChecking::new),
            ac3: config.ac3.then(Ac3::new),
            backjumping: config.backjumping,
            frames: Vec::new(),
            stats: SearchStats::default(),
        })
    }

    fn search(&mut self) -> Outcome {
        // graph-wide arc consistency before any decision is made; removals
        // at depth zero are permanent, so the trail stays out of it
        if let Some(mut ac3) = self.ac3.take() {
            let initial =
                ac3.propagate_all(&mut self.grid, &self.peers, &mut self.trail, &mut self.conflicts);
            self.ac3 = Some(ac3);
            if matches!(initial, Propagation::Wipeout(_)) {
                return Outcome::Unsolvable;
            }
        }

        let mut mode = Mode::Select;
        loop {
            match mode {
                Mode::Select => {
                    let Some(cell) = self.selector.pick(&self.grid) else {
                        return Outcome::Solved(self.grid.to_givens());
                    };
                    let values = self.orderer.order(&self.grid, &self.peers, cell);
                    self.frames.push(Frame {
                        cell,
                        values,
                        next: 0,
                    });
                    mode = Mode::Try;
                }
                Mode::Try => {
                    mode = match self.try_next_value() {
                        TryResult::Assigned => Mode::Select,
                        TryResult::Exhausted => Mode::Backtrack,
                    };
                }
                Mode::Backtrack => {
                    if !self.backtrack() {
                        return Outcome::Unsolvable;
                    }
                    mode = Mode::Try;
                }
            }
        }
    }

    /// Tries the top frame's remaining values in order. Returns `Assigned`
    /// once a value survives consistency checking and propagation.
    fn try_next_value(&mut self) -> TryResult {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return TryResult::Exhausted;
            };
            let cell = frame.cell;
            let Some(&value) = frame.values.get(frame.next) else {
                return TryResult::Exhausted;
            };
            frame.next += 1;

            if !self.grid.is_consistent(&self.peers, cell, value) {
                // the assigned peers holding this value are the failure;
                // without this blame a propagation-free run could exhaust a
                // cell with an empty conflict set and misreport unsolvable
                let culprits: SmallVec<[Cell; 4]> = self
                    .grid
                    .conflicting_peers(&self.peers, cell, value)
                    .collect();
                for p in culprits {
                    self.conflicts.blame(cell, p);
                }
                continue;
            }

            self.grid.assign(cell, value);
            self.trail.push(cell, value);
            self.stats.assignments += 1;

            if self.run_propagators(cell, value) {
                return TryResult::Assigned;
            }

            // the tentative assignment failed: undo it together with its
            // propagation effects and move on to the next value
            self.trail.undo_last(&mut self.grid);
        }
    }

    /// Runs the enabled propagators for a fresh assignment. On wipeout the
    /// blame is merged per the conflict-set contract and `false` returned.
    fn run_propagators(&mut self, cell: Cell, value: u8) -> bool {
        if let Some(mut fc) = self.forward_checking {
            let result = fc.propagate(
                &mut self.grid,
                &self.peers,
                &mut self.trail,
                &mut self.conflicts,
                cell,
                value,
            );
            self.forward_checking = Some(fc);
            if let Propagation::Wipeout(victim) = result {
                self.attribute_wipeout(cell, victim);
                return false;
            }
        }

        if let Some(mut ac3) = self.ac3.take() {
            let result = ac3.propagate(
                &mut self.grid,
                &self.peers,
                &mut self.trail,
                &mut self.conflicts,
                cell,
                value,
            );
            self.ac3 = Some(ac3);
            if let Propagation::Wipeout(victim) = result {
                self.attribute_wipeout(cell, victim);
                return false;
            }
        }

        true
    }

    /// The failure belongs to both ends: the assigning cell joins the wiped
    /// cell's conflict set, and the wiped cell's accumulated blame is folded
    /// into the assigning cell's.
    fn attribute_wipeout(&mut self, cell: Cell, victim: Cell) {
        self.conflicts.blame(victim, cell);
        self.conflicts.absorb(cell, victim);
    }

    /// Undoes back to a jump target, returning `false` when the search is
    /// exhausted. With backjumping the target is the most recently assigned
    /// member of the failing cell's conflict set; without it, the
    /// immediately preceding assignment unconditionally.
    fn backtrack(&mut self) -> bool {
        let Some(failed_frame) = self.frames.pop() else {
            return false;
        };
        let failed = failed_frame.cell;

        let target = if self.backjumping {
            self.trail
                .cells_newest_first()
                .find(|&t| self.conflicts.contains(failed, t))
        } else {
            self.trail.last_cell()
        };

        let Some(target) = target else {
            // nothing above is implicated: genuinely unsolvable
            return false;
        };

        // unwind everything above the target, propagating blame upward so a
        // later jump from the target also skips the irrelevant choices
        let mut skipped = 0usize;
        while let Some(top) = self.trail.last_cell() {
            if top == target {
                break;
            }
            self.trail.undo_last(&mut self.grid);
            self.frames.pop();
            self.conflicts.absorb(target, top);
            self.conflicts.clear(top);
            skipped += 1;
        }

        // the target's own assignment goes too, but its frame stays so the
        // retry resumes with its next untried value
        self.trail.undo_last(&mut self.grid);
        self.conflicts.absorb(target, failed);
        self.conflicts.clear(failed);

        if skipped > 0 {
            self.stats.backjumps += 1;
        } else {
            self.stats.backtracks += 1;
        }
        true
    }

    fn sync_propagation_stats(&mut self) {
        self.stats.propagations = self.forward_checking.map_or(0, |fc| fc.removals())
            + self.ac3.as_ref().map_or(0, Propagator::removals);
    }
}

impl Solver for Engine {
    fn solve(&mut self) -> Outcome {
        let outcome = self.search();
        self.sync_propagation_stats();
        outcome
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
