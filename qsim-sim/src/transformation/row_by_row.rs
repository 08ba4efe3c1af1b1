//! One circuit matrix row at a time

use super::{check_dimension, StatevectorTransformation, UnitaryTransformation};
use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::error::{Result, SimulatorError};
use crate::pool;
use qsim_core::{Matrix, Vector};

/// Expands each row of the circuit matrix and multiplies it with the state
///
/// Rows are spread over `calculation_concurrency` threads; building a single
/// row uses `expansion_concurrency` threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowByRowTransformation {
    calculation_concurrency: usize,
    expansion_concurrency: usize,
}

impl RowByRowTransformation {
    /// # Errors
    /// [`SimulatorError::ZeroConcurrency`] if either knob is zero
    pub fn new(calculation_concurrency: usize, expansion_concurrency: usize) -> Result<Self> {
        if calculation_concurrency == 0 {
            return Err(SimulatorError::ZeroConcurrency {
                knob: "calculation_concurrency",
            });
        }
        if expansion_concurrency == 0 {
            return Err(SimulatorError::ZeroConcurrency {
                knob: "expansion_concurrency",
            });
        }
        Ok(Self {
            calculation_concurrency,
            expansion_concurrency,
        })
    }

    #[inline]
    pub fn calculation_concurrency(&self) -> usize {
        self.calculation_concurrency
    }

    #[inline]
    pub fn expansion_concurrency(&self) -> usize {
        self.expansion_concurrency
    }
}

impl StatevectorTransformation for RowByRowTransformation {
    fn transform_statevector(
        &self,
        matrix: &CircuitSimulatorMatrix,
        vector: &Vector,
    ) -> Result<Vector> {
        check_dimension(matrix, vector.len())?;

        let values = pool::try_fill_indexed(vector.len(), self.calculation_concurrency, |index| {
            let row = matrix.row(index, self.expansion_concurrency)?;
            Ok(row.dot(vector)?)
        })?;
        Ok(Vector::new(values)?)
    }
}

impl UnitaryTransformation for RowByRowTransformation {
    fn transform_unitary(&self, matrix: &CircuitSimulatorMatrix, unitary: &Matrix) -> Result<Matrix> {
        check_dimension(matrix, unitary.rows())?;

        let rows = pool::try_fill_indexed(unitary.rows(), self.calculation_concurrency, |index| {
            let row = matrix.row(index, self.expansion_concurrency)?;
            Ok(row.multiply_matrix(unitary)?)
        })?;
        Ok(Matrix::from_row_vectors(rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::TOLERANCE;
    use qsim_gates::Gate;

    #[test]
    fn test_matches_expanded_product() {
        let extracted = Gate::controlled(Gate::hadamard(1), vec![0]).extract(2, TOLERANCE).unwrap();
        let matrix = CircuitSimulatorMatrix::from_extracted(2, extracted).unwrap();
        let transformation = RowByRowTransformation::new(2, 2).unwrap();

        let input = Vector::basis(4, 0b01).unwrap();
        let result = transformation.transform_statevector(&matrix, &input).unwrap();
        let expected = matrix
            .expanded_raw_matrix(1)
            .unwrap()
            .multiply_vector(&input)
            .unwrap();
        assert!(result.is_approximately_equal(&expected, 1e-12));
    }

    #[test]
    fn test_zero_concurrency() {
        assert!(RowByRowTransformation::new(0, 1).is_err());
        assert_eq!(
            RowByRowTransformation::new(1, 0),
            Err(SimulatorError::ZeroConcurrency {
                knob: "expansion_concurrency"
            })
        );
    }
}
