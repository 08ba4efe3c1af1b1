//! Error types for qsim

use thiserror::Error;

/// Errors raised by matrix arithmetic, bit rearrangement and gate validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// A matrix or vector was built without any element
    #[error("{0} must contain at least one element")]
    Empty(&'static str),

    /// Rows of a matrix literal have different lengths
    #[error("Matrix row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Operand shapes are incompatible for the requested operation
    #[error("Dimension mismatch in {operation}: {left} vs {right}")]
    DimensionMismatch {
        operation: &'static str,
        left: String,
        right: String,
    },

    /// An index or a slice falls outside of a matrix or vector
    #[error("Index out of range: {0}")]
    OutOfRange(String),

    /// A permutation does not map 0..n onto itself exactly once
    #[error("Permutation {0:?} is not invertible")]
    InvalidPermutation(Vec<usize>),

    /// Matrix is not square
    #[error("Matrix is not square: {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    /// Dimension is not a power of two
    #[error("Dimension {0} is not a power of 2")]
    NotPowerOfTwo(usize),

    /// Matrix is not unitary within tolerance
    #[error("Matrix is not unitary within tolerance {tolerance}")]
    NotUnitary { tolerance: f64 },

    /// Matrix is not Hermitian within tolerance
    #[error("Matrix is not hermitian within tolerance {tolerance}")]
    NotHermitian { tolerance: f64 },

    /// Eigen-decomposition did not converge
    #[error("Eigen-decomposition did not converge")]
    EigenDecompositionFailed,

    /// Circuit or gate declared without qubits
    #[error("Qubit count must be greater than zero")]
    EmptyQubitCount,

    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Duplicate qubit in gate operation
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(usize),

    /// Gate matrix size and number of inputs disagree
    #[error("Gate matrix acts on {expected} qubits, but {actual} inputs were provided")]
    InputCountMismatch { expected: usize, actual: usize },

    /// Gate needs more qubits than the circuit declares
    #[error("Gate spans {gate_qubits} qubits, but circuit has only {qubit_count}")]
    GateSpansTooManyQubits {
        gate_qubits: usize,
        qubit_count: usize,
    },

    /// Controlled gate or oracle without controls
    #[error("Control list must not be empty")]
    EmptyControls,

    /// Truth table entry holds characters other than '0' and '1'
    #[error("Truth table entry '{0}' may only contain '0' and '1'")]
    InvalidTruthTableEntry(String),

    /// Truth table entry does not fit in the declared controls
    #[error("Truth table entry '{entry}' does not fit in {control_count} controls")]
    TruthTableEntryTooWide {
        entry: String,
        control_count: usize,
    },

    /// Noise channel parameter outside of its domain
    #[error("Invalid noise parameter: {0}")]
    InvalidNoise(String),
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, qubit_count: usize) -> Self {
        Self::InvalidQubit(qubit, qubit_count)
    }

    /// Create a dimension mismatch error from two printable shapes
    pub fn dimension_mismatch(
        operation: &'static str,
        left: impl ToString,
        right: impl ToString,
    ) -> Self {
        Self::DimensionMismatch {
            operation,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let err = QuantumError::dimension_mismatch("multiply", "2x3", "2x3");
        let msg = format!("{}", err);
        assert!(msg.contains("multiply"));
        assert!(msg.contains("2x3"));
    }

    #[test]
    fn test_truth_table_error() {
        let err = QuantumError::TruthTableEntryTooWide {
            entry: "101".to_string(),
            control_count: 2,
        };
        assert!(format!("{}", err).contains("101"));
    }
}
