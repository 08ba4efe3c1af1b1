//! Every circuit matrix element recomputed inside the sums

use super::{check_dimension, StatevectorTransformation, UnitaryTransformation};
use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::error::{Result, SimulatorError};
use crate::pool;
use qsim_core::{Complex64, Matrix, Vector};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Computes each output element as a streamed sum over matrix elements
///
/// Nothing is stored besides the result; every output element is an
/// independent task, which gives the finest parallel granularity at the
/// price of `count` element lookups per output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementByElementTransformation {
    calculation_concurrency: usize,
}

impl ElementByElementTransformation {
    /// # Errors
    /// [`SimulatorError::ZeroConcurrency`] if `calculation_concurrency` is zero
    pub fn new(calculation_concurrency: usize) -> Result<Self> {
        if calculation_concurrency == 0 {
            return Err(SimulatorError::ZeroConcurrency {
                knob: "calculation_concurrency",
            });
        }
        Ok(Self {
            calculation_concurrency,
        })
    }

    #[inline]
    pub fn calculation_concurrency(&self) -> usize {
        self.calculation_concurrency
    }
}

impl StatevectorTransformation for ElementByElementTransformation {
    fn transform_statevector(
        &self,
        matrix: &CircuitSimulatorMatrix,
        vector: &Vector,
    ) -> Result<Vector> {
        check_dimension(matrix, vector.len())?;

        let input = vector.values();
        let values = pool::fill_indexed(input.len(), self.calculation_concurrency, |row| {
            input
                .iter()
                .enumerate()
                .fold(ZERO, |sum, (column, value)| sum + matrix.element(row, column) * value)
        })?;
        Ok(Vector::new(values)?)
    }
}

impl UnitaryTransformation for ElementByElementTransformation {
    fn transform_unitary(&self, matrix: &CircuitSimulatorMatrix, unitary: &Matrix) -> Result<Matrix> {
        check_dimension(matrix, unitary.rows())?;

        let (rows, columns) = (unitary.rows(), unitary.columns());
        let values = pool::fill_indexed(rows * columns, self.calculation_concurrency, |index| {
            let (row, column) = (index / columns, index % columns);
            (0..rows).fold(ZERO, |sum, k| sum + matrix.element(row, k) * unitary[(k, column)])
        })?;
        Ok(Matrix::from_values(rows, columns, values)?)
    }
}
