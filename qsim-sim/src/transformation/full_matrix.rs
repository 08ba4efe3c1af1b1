//! Full expansion followed by a dense product

use super::{check_dimension, StatevectorTransformation, UnitaryTransformation};
use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::error::{Result, SimulatorError};
use qsim_core::{Matrix, Vector};

/// Materializes the `2^n × 2^n` circuit matrix, then multiplies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullMatrixTransformation {
    expansion_concurrency: usize,
}

impl FullMatrixTransformation {
    /// # Errors
    /// [`SimulatorError::ZeroConcurrency`] if `expansion_concurrency` is zero
    pub fn new(expansion_concurrency: usize) -> Result<Self> {
        if expansion_concurrency == 0 {
            return Err(SimulatorError::ZeroConcurrency {
                knob: "expansion_concurrency",
            });
        }
        Ok(Self {
            expansion_concurrency,
        })
    }

    #[inline]
    pub fn expansion_concurrency(&self) -> usize {
        self.expansion_concurrency
    }
}

impl StatevectorTransformation for FullMatrixTransformation {
    fn transform_statevector(
        &self,
        matrix: &CircuitSimulatorMatrix,
        vector: &Vector,
    ) -> Result<Vector> {
        check_dimension(matrix, vector.len())?;
        let expanded = matrix.expanded_raw_matrix(self.expansion_concurrency)?;
        Ok(expanded.multiply_vector(vector)?)
    }
}

impl UnitaryTransformation for FullMatrixTransformation {
    fn transform_unitary(&self, matrix: &CircuitSimulatorMatrix, unitary: &Matrix) -> Result<Matrix> {
        check_dimension(matrix, unitary.rows())?;
        let expanded = matrix.expanded_raw_matrix(self.expansion_concurrency)?;
        Ok(expanded.multiply(unitary)?)
    }
}
