//! Error types for quantum state validation

use qsim_core::QuantumError;
use thiserror::Error;

/// Errors that can occur while building or querying a quantum state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Underlying matrix, vector or qubit error
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// Statevector not normalized
    #[error("State vector not normalized, squared norm = {squared_norm}")]
    NotNormalized { squared_norm: f64 },

    /// Density matrix with a negative eigenvalue
    #[error("Density matrix has negative eigenvalue {eigenvalue}")]
    NegativeEigenvalue { eigenvalue: f64 },

    /// Density matrix eigenvalues do not sum to one
    #[error("Density matrix trace is {trace}, expected 1")]
    InvalidTrace { trace: f64 },

    /// Bit string with characters other than '0' and '1'
    #[error("Invalid bit string '{0}'")]
    InvalidBitString(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
