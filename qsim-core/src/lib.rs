//! Core numeric types for the qsim quantum circuit simulator
//!
//! This crate provides the building blocks every other qsim crate relies on:
//! - [`Matrix`] and [`Vector`]: immutable dense complex linear algebra
//! - [`BitRearranger`]: mapping between register indices and gate-local indices
//! - [`QuantumError`]: shape, gate and truth-table validation failures
//!
//! # Example
//! ```
//! use qsim_core::{BitRearranger, Complex64, Matrix, Vector};
//!
//! let not = Matrix::new(vec![
//!     vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!     vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
//! ]).unwrap();
//! let zero = Vector::basis(2, 0).unwrap();
//! assert_eq!(not.multiply_vector(&zero).unwrap()[1], Complex64::new(1.0, 0.0));
//!
//! let rearranger = BitRearranger::new(&[1, 0]);
//! assert_eq!(rearranger.rearrange_bits(0b01), 0b10);
//! ```

pub mod bits;
mod eigen;
pub mod error;
pub mod matrix;
pub mod vector;

// Re-exports for convenience
pub use bits::{validate_inputs, BitRearranger, BitwiseShift};
pub use error::QuantumError;
pub use matrix::Matrix;
pub use num_complex::Complex64;
pub use vector::Vector;

/// Absolute tolerance shared by every approximate comparison in qsim
pub const TOLERANCE: f64 = 1e-6;

/// Type alias for results in qsim
pub type Result<T> = std::result::Result<T, QuantumError>;
