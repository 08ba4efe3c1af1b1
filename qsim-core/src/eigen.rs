//! Eigenvalues of Hermitian matrices
//!
//! Density matrices are checked through their spectrum: a valid state has
//! non-negative eigenvalues summing to one. The decomposition is delegated to
//! `nalgebra`'s symmetric (Hermitian) eigen solver.

use crate::{Matrix, QuantumError, Result};
use nalgebra::{DMatrix, SymmetricEigen};

impl Matrix {
    /// Real eigenvalues of a Hermitian matrix, sorted in ascending order
    ///
    /// # Errors
    /// - [`QuantumError::NotHermitian`] if `M ≠ M†` within `tolerance`
    /// - [`QuantumError::EigenDecompositionFailed`] if the solver does not converge
    pub fn hermitian_eigenvalues(&self, tolerance: f64) -> Result<Vec<f64>> {
        if !self.is_approximately_hermitian(tolerance) {
            return Err(QuantumError::NotHermitian { tolerance });
        }

        let count = self.rows();
        let dense = DMatrix::from_fn(count, count, |row, column| self[(row, column)]);
        // max_niter = 0 lets the solver iterate until convergence
        let eigen = SymmetricEigen::try_new(dense, f64::EPSILON, 0)
            .ok_or(QuantumError::EigenDecompositionFailed)?;

        let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
        eigenvalues.sort_by(|a, b| a.total_cmp(b));
        Ok(eigenvalues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_pauli_y_eigenvalues() {
        let y = Matrix::new(vec![
            vec![Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
            vec![Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)],
        ])
        .unwrap();
        let eigenvalues = y.hermitian_eigenvalues(1e-10).unwrap();
        assert_relative_eq!(eigenvalues[0], -1.0, epsilon = 1e-10);
        assert_relative_eq!(eigenvalues[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_mixed_state_eigenvalues() {
        let rho = Matrix::new(vec![
            vec![Complex64::new(0.75, 0.0), Complex64::new(0.0, 0.0)],
            vec![Complex64::new(0.0, 0.0), Complex64::new(0.25, 0.0)],
        ])
        .unwrap();
        let eigenvalues = rho.hermitian_eigenvalues(1e-10).unwrap();
        assert_relative_eq!(eigenvalues[0], 0.25, epsilon = 1e-10);
        assert_relative_eq!(eigenvalues[1], 0.75, epsilon = 1e-10);
    }

    #[test]
    fn test_non_hermitian_rejected() {
        let m = Matrix::new(vec![
            vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
            vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ])
        .unwrap();
        assert_eq!(
            m.hermitian_eigenvalues(1e-6),
            Err(QuantumError::NotHermitian { tolerance: 1e-6 })
        );
    }
}
