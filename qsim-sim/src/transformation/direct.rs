//! Direct index computation, nothing materialized

use super::{check_dimension, StatevectorTransformation, UnitaryTransformation};
use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::error::{Result, SimulatorError};
use crate::pool;
use qsim_core::{Complex64, Matrix, Vector};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Computes each output index from the `2^k` inputs it depends on
///
/// Output `p` reads the gate matrix row `rearrange_bits(p)` and, for every
/// gate-local column `c`, the input at `(p & unselected) | mask(c)`.
/// Single-qubit gates take a closed-form two-term path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectTransformation {
    calculation_concurrency: usize,
}

impl DirectTransformation {
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

    fn single_qubit(&self, matrix: &CircuitSimulatorMatrix, values: &[Complex64]) -> Result<Vec<Complex64>> {
        let base = matrix.base();
        let mask = matrix.rearranger().selected_bits_mask();
        let (m00, m01) = (base.element(0, 0), base.element(0, 1));
        let (m10, m11) = (base.element(1, 0), base.element(1, 1));

        pool::fill_indexed(values.len(), self.calculation_concurrency, |position| {
            let other = values[position ^ mask];
            if position & mask == 0 {
                m00 * values[position] + m01 * other
            } else {
                m10 * other + m11 * values[position]
            }
        })
    }

    fn multi_qubit(&self, matrix: &CircuitSimulatorMatrix, values: &[Complex64]) -> Result<Vec<Complex64>> {
        let base = matrix.base();
        let masks = matrix.rearranger().activation_masks();

        pool::fill_indexed(values.len(), self.calculation_concurrency, |position| {
            let (row, remaining) = matrix.equivalence(position);
            masks
                .iter()
                .enumerate()
                .fold(ZERO, |sum, (column, &mask)| {
                    let factor = base.element(row, column);
                    if factor == ZERO {
                        sum
                    } else {
                        sum + factor * values[remaining | mask]
                    }
                })
        })
    }
}

impl StatevectorTransformation for DirectTransformation {
    fn transform_statevector(
        &self,
        matrix: &CircuitSimulatorMatrix,
        vector: &Vector,
    ) -> Result<Vector> {
        check_dimension(matrix, vector.len())?;

        let values = if matrix.rearranger().input_count() == 1 {
            self.single_qubit(matrix, vector.values())?
        } else {
            self.multi_qubit(matrix, vector.values())?
        };
        Ok(Vector::new(values)?)
    }
}

impl UnitaryTransformation for DirectTransformation {
    fn transform_unitary(&self, matrix: &CircuitSimulatorMatrix, unitary: &Matrix) -> Result<Matrix> {
        check_dimension(matrix, unitary.rows())?;

        let base = matrix.base();
        let masks = matrix.rearranger().activation_masks();
        let columns = unitary.columns();
        let values = unitary.values();

        let rows = pool::fill_indexed(unitary.rows(), self.calculation_concurrency, |position| {
            let (row, remaining) = matrix.equivalence(position);
            let mut result = vec![ZERO; columns];
            for (column, &mask) in masks.iter().enumerate() {
                let factor = base.element(row, column);
                if factor == ZERO {
                    continue;
                }
                let source = (remaining | mask) * columns;
                for (target, value) in result.iter_mut().zip(&values[source..source + columns]) {
                    *target += factor * value;
                }
            }
            result
        })?;

        Ok(Matrix::from_values(unitary.rows(), columns, rows.concat())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::TOLERANCE;
    use qsim_gates::{matrices, Gate};

    fn lifted(gate: Gate, qubit_count: usize) -> CircuitSimulatorMatrix {
        let extracted = gate.extract(qubit_count, TOLERANCE).unwrap();
        CircuitSimulatorMatrix::from_extracted(qubit_count, extracted).unwrap()
    }

    #[test]
    fn test_not_flips_basis_state() {
        let transformation = DirectTransformation::new(1).unwrap();
        let matrix = lifted(Gate::not(1), 2);
        let result = transformation
            .transform_statevector(&matrix, &Vector::basis(4, 0b00).unwrap())
            .unwrap();
        assert_eq!(result, Vector::basis(4, 0b10).unwrap());
    }

    #[test]
    fn test_single_qubit_path_matches_general_path() {
        let transformation = DirectTransformation::new(2).unwrap();
        let single = lifted(Gate::hadamard(0), 2);
        // same gate through the k-qubit path
        let general = lifted(
            Gate::matrix(
                matrices::hadamard().tensor_product(&Matrix::identity(2).unwrap()),
                vec![0, 1],
            ),
            2,
        );
        let input = Vector::basis(4, 0b01).unwrap();
        let a = transformation.transform_statevector(&single, &input).unwrap();
        let b = transformation.transform_statevector(&general, &input).unwrap();
        assert!(a.is_approximately_equal(&b, 1e-12));
    }

    #[test]
    fn test_unitary_of_identity_is_expansion() {
        let transformation = DirectTransformation::new(3).unwrap();
        let matrix = lifted(Gate::controlled_not(0, 2), 3);
        let identity = Matrix::identity(8).unwrap();
        let result = transformation.transform_unitary(&matrix, &identity).unwrap();
        assert_eq!(result, matrix.expanded_raw_matrix(1).unwrap());
    }

    #[test]
    fn test_dimension_mismatch() {
        let transformation = DirectTransformation::new(1).unwrap();
        let matrix = lifted(Gate::hadamard(0), 2);
        let result = transformation.transform_statevector(&matrix, &Vector::basis(2, 0).unwrap());
        assert!(matches!(result, Err(SimulatorError::Quantum(_))));
    }

    #[test]
    fn test_zero_concurrency() {
        assert_eq!(
            DirectTransformation::new(0),
            Err(SimulatorError::ZeroConcurrency {
                knob: "calculation_concurrency"
            })
        );
    }
}
