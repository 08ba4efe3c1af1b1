//! Quantum state representations for qsim
//!
//! This crate provides the two validated state types the simulator advances
//! gate by gate:
//!
//! - **Statevector**: 2^n amplitudes of a pure state, normalized on construction
//! - **DensityMatrix**: 2^n × 2^n mixed state, checked to be Hermitian,
//!   positive semi-definite and of unit trace
//!
//! Both expose computational basis probabilities, partial measurement of a
//! list of qubits and a summary keyed by bit strings.
//!
//! # Example
//!
//! ```
//! use qsim_state::Statevector;
//!
//! let state = Statevector::zero(2).unwrap();
//! let summary = state.summarized_probabilities();
//! assert_eq!(summary["00"], 1.0);
//! ```

pub mod density_matrix;
pub mod error;
pub mod measurement;
pub mod state_vector;

pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use state_vector::Statevector;
