//! Gate decomposition for qsim
//!
//! This crate rewrites arbitrary gates into elementary ones:
//! - Single-qubit unitaries into Z-Y-Z rotations
//! - Multi-qubit unitaries into NOT gates and fully controlled single-qubit
//!   gates, via a Gray-code ordered two-level decomposition

pub mod decomposition;

pub use decomposition::{
    EulerAngles, SingleQubitDecomposer, SingleQubitDecomposition, TwoLevelDecompositionSolver,
};
