#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod cell;
pub mod conflict;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod grid;
pub mod propagation;
pub mod solver;
pub mod trail;
pub mod value_ordering;
pub mod variable_selection;
