//! Quantum gate library for qsim
//!
//! Gates are described by the closed [`Gate`] sum type and turned into a
//! normalised matrix plus ordered inputs by [`Gate::extract`]. Controlled and
//! oracle gates keep their block structure as an [`OracleMatrix`] so the
//! simulator can evaluate elements without expanding them.
//!
//! # Features
//!
//! - **Standard matrices**: Hadamard, NOT, Pauli, CNOT constants and phase /
//!   rotation factories in [`matrices`]
//! - **Oracles**: truth tables of activation patterns, with nested oracles
//!   collapsing into a single concatenated table
//! - **Noise**: Kraus channels for density-matrix simulation
//!
//! # Example
//!
//! ```
//! use qsim_gates::{Axis, Gate};
//! use std::f64::consts::PI;
//!
//! let gates = vec![
//!     Gate::hadamard(0),
//!     Gate::rotation(Axis::Z, PI / 4.0, 1),
//!     Gate::oracle(["10"], vec![0, 1], Gate::not(2)),
//! ];
//! for gate in &gates {
//!     assert!(gate.extract(3, qsim_core::TOLERANCE).is_ok());
//! }
//! ```

pub mod gate;
pub mod matrices;
pub mod noise;
pub mod simulator_matrix;
pub mod truth_table;

// Re-export commonly used items
pub use gate::{ExtractedGate, Gate, Inputs};
pub use matrices::Axis;
pub use noise::{ExtractedNoise, Noise, Operator};
pub use simulator_matrix::{OracleMatrix, SimulatorMatrix};
pub use truth_table::TruthTable;
