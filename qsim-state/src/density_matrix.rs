//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with Tr(ρ) = 1.
//! For pure states: ρ = |ψ⟩⟨ψ|
//! For mixed states: ρ = Σᵢ pᵢ |ψᵢ⟩⟨ψᵢ|
//!
//! # Key Properties
//!
//! - **Purity**: Tr(ρ²) ∈ (0, 1], equals 1 for pure states
//! - **Probabilities**: the diagonal holds the computational basis probabilities
//!
//! # Example
//!
//! ```
//! use qsim_state::{DensityMatrix, Statevector};
//!
//! let pure = DensityMatrix::from_statevector(&Statevector::from_bits("1").unwrap());
//! assert!((pure.purity() - 1.0).abs() < 1e-10);
//!
//! let mixed = DensityMatrix::maximally_mixed(1).unwrap();
//! assert!((mixed.purity() - 0.5).abs() < 1e-10);
//! ```

use crate::error::{Result, StateError};
use crate::measurement;
use crate::state_vector::{dimension, Statevector};
use qsim_core::{Complex64, Matrix, TOLERANCE};
use serde::Serialize;
use std::collections::BTreeMap;

/// Validated density matrix of a qubit register
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityMatrix {
    qubit_count: usize,
    matrix: Matrix,
}

impl DensityMatrix {
    /// Validate `matrix` as a density matrix
    ///
    /// # Errors
    /// - [`StateError::InvalidDimension`] unless the matrix is square with a
    ///   power-of-two size
    /// - [`StateError::Quantum`] if it is not Hermitian within `tolerance`
    /// - [`StateError::NegativeEigenvalue`] for an eigenvalue below `-tolerance`
    /// - [`StateError::InvalidTrace`] unless the eigenvalues sum to one
    pub fn new(matrix: Matrix, tolerance: f64) -> Result<Self> {
        let qubit_count = matrix
            .qubit_count()
            .map_err(|_| StateError::InvalidDimension {
                dimension: matrix.rows(),
            })?;

        let eigenvalues = matrix.hermitian_eigenvalues(tolerance)?;
        if let Some(&eigenvalue) = eigenvalues.first() {
            if eigenvalue < -tolerance {
                return Err(StateError::NegativeEigenvalue { eigenvalue });
            }
        }

        let trace: f64 = eigenvalues.iter().sum();
        if (trace - 1.0).abs() > tolerance {
            return Err(StateError::InvalidTrace { trace });
        }

        Ok(Self {
            qubit_count,
            matrix,
        })
    }

    /// Pure state ρ = |ψ⟩⟨ψ|
    pub fn from_statevector(state: &Statevector) -> Self {
        let amplitudes = state.amplitudes();
        let count = amplitudes.len();
        let values = (0..count * count)
            .map(|i| amplitudes[i / count] * amplitudes[i % count].conj())
            .collect();

        Self {
            qubit_count: state.qubit_count(),
            matrix: Matrix::from_values(count, count, values)
                .unwrap_or_else(|_| unreachable!("outer product of a non-empty statevector")),
        }
    }

    /// `|0…0⟩⟨0…0|`
    pub fn zero(qubit_count: usize) -> Result<Self> {
        Ok(Self::from_statevector(&Statevector::zero(qubit_count)?))
    }

    /// ρ = I/2^n
    pub fn maximally_mixed(qubit_count: usize) -> Result<Self> {
        let dimension = dimension(qubit_count)?;
        let value = Complex64::new(1.0 / dimension as f64, 0.0);
        let matrix = Matrix::identity(dimension)?.scaled(value);
        Ok(Self {
            qubit_count,
            matrix,
        })
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.matrix.rows()
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Complex64 {
        self.matrix[(row, column)]
    }

    /// Purity Tr(ρ²)
    ///
    /// For Hermitian ρ this is the sum of |ρᵢⱼ|².
    pub fn purity(&self) -> f64 {
        self.matrix.values().iter().map(|v| v.norm_sqr()).sum()
    }

    /// Probability of every basis state, read from the diagonal
    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|i| self.matrix[(i, i)].re.max(0.0))
            .collect()
    }

    /// Probability of every outcome of `qubits`, `qubits[0]` most significant
    pub fn measure(&self, qubits: &[usize]) -> Result<Vec<f64>> {
        measurement::marginal_probabilities(&self.probabilities(), self.qubit_count, qubits)
    }

    /// Non-negligible outcomes keyed by bit string, qubit 0 rightmost
    pub fn summarized_probabilities(&self) -> BTreeMap<String, f64> {
        measurement::summarize(&self.probabilities(), self.qubit_count, TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsim_core::QuantumError;

    fn diagonal(values: &[f64]) -> Matrix {
        let count = values.len();
        Matrix::from_fn(count, count, |r, c| {
            if r == c {
                Complex64::new(values[r], 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_accepts_mixed_state() {
        let rho = DensityMatrix::new(diagonal(&[0.25, 0.75]), TOLERANCE).unwrap();
        assert_eq!(rho.qubit_count(), 1);
        assert_relative_eq!(rho.purity(), 0.625);
        assert_eq!(rho.probabilities(), vec![0.25, 0.75]);
    }

    #[test]
    fn test_rejects_negative_eigenvalue() {
        let result = DensityMatrix::new(diagonal(&[1.5, -0.5]), TOLERANCE);
        assert!(matches!(result, Err(StateError::NegativeEigenvalue { .. })));
    }

    #[test]
    fn test_rejects_wrong_trace() {
        let result = DensityMatrix::new(diagonal(&[0.5, 0.25]), TOLERANCE);
        assert!(matches!(result, Err(StateError::InvalidTrace { .. })));
    }

    #[test]
    fn test_rejects_non_hermitian() {
        let zero = Complex64::new(0.0, 0.0);
        let half = Complex64::new(0.5, 0.0);
        let matrix = Matrix::from([[half, Complex64::new(0.0, 0.1)], [zero, half]]);
        assert!(matches!(
            DensityMatrix::new(matrix, TOLERANCE),
            Err(StateError::Quantum(QuantumError::NotHermitian { .. }))
        ));
    }

    #[test]
    fn test_rejects_bad_dimension() {
        let result = DensityMatrix::new(diagonal(&[0.5, 0.25, 0.25]), TOLERANCE);
        assert_eq!(result, Err(StateError::InvalidDimension { dimension: 3 }));
    }

    #[test]
    fn test_pure_state_from_statevector() {
        let state = Statevector::from_bits("01").unwrap();
        let rho = DensityMatrix::from_statevector(&state);
        assert_relative_eq!(rho.purity(), 1.0);
        assert_eq!(rho.get(1, 1), Complex64::new(1.0, 0.0));
        assert!(DensityMatrix::new(rho.matrix().clone(), TOLERANCE).is_ok());
        assert_eq!(rho.summarized_probabilities().keys().collect::<Vec<_>>(), vec!["01"]);
    }

    #[test]
    fn test_measure_maximally_mixed() {
        let rho = DensityMatrix::maximally_mixed(3).unwrap();
        let outcomes = rho.measure(&[2, 0]).unwrap();
        for probability in outcomes {
            assert_relative_eq!(probability, 0.25);
        }
    }
}
