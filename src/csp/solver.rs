#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::grid::Givens;
use crate::csp::variable_selection::VariableSelectionType;
use crate::csp::value_ordering::ValueOrderingType;

/// Which techniques the engine runs. Propagators and backjumping are
/// independently toggleable; a variable-selection and a value-ordering
/// policy are always active (the fallbacks are policies, not absences).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub forward_checking: bool,
    pub ac3: bool,
    pub backjumping: bool,
    pub variable_selection: VariableSelectionType,
    pub value_ordering: ValueOrderingType,
}

impl Default for SearchConfig {
    /// Everything on, the recommended configuration.
    fn default() -> Self {
        Self {
            forward_checking: true,
            ac3: true,
            backjumping: true,
            variable_selection: VariableSelectionType::Mrv,
            value_ordering: ValueOrderingType::Lcv,
        }
    }
}

/// Counters observable from outside the engine. Elapsed time is the
/// caller's to measure around `solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Tentative assignments made (including ones later undone).
    pub assignments: usize,
    /// Domain removals performed by the propagators.
    pub propagations: usize,
    /// Chronological single-step retreats.
    pub backtracks: usize,
    /// Non-chronological jumps that skipped at least one assignment.
    pub backjumps: usize,
}

/// Final result of a search. Unsolvable is a normal value, not an error;
/// invalid input is rejected before an engine exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Givens),
    Unsolvable,
}

impl Outcome {
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// The solving entry point implemented by the engine.
pub trait Solver {
    fn solve(&mut self) -> Outcome;
    fn stats(&self) -> SearchStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_everything() {
        let config = SearchConfig::default();
        assert!(config.forward_checking);
        assert!(config.ac3);
        assert!(config.backjumping);
        assert_eq!(config.variable_selection, VariableSelectionType::Mrv);
        assert_eq!(config.value_ordering, ValueOrderingType::Lcv);
    }

    #[test]
    fn test_outcome_is_solved() {
        assert!(Outcome::Solved([[0; 9]; 9]).is_solved());
        assert!(!Outcome::Unsolvable.is_solved());
    }
}
