//! A gate's matrix over the whole register, evaluated on demand
//!
//! For an `n`-qubit register the full matrix has `4^n` elements, but a gate
//! on `k` inputs only has `4^k` distinct ones. [`CircuitSimulatorMatrix`]
//! stores, for every register index, the gate-local index and the untouched
//! remaining bits, and answers element lookups from those pairs.

use crate::error::{Result, SimulatorError};
use crate::pool;
use qsim_core::{BitRearranger, Complex64, Matrix, Vector};
use qsim_gates::{ExtractedGate, SimulatorMatrix};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Virtual `2^n × 2^n` matrix of a gate acting on an `n`-qubit register
#[derive(Debug, Clone)]
pub struct CircuitSimulatorMatrix {
    qubit_count: usize,
    base: SimulatorMatrix,
    inputs: Vec<usize>,
    rearranger: BitRearranger,
    equivalences: Vec<(usize, usize)>,
}

impl CircuitSimulatorMatrix {
    /// Lift `base`, acting on `inputs`, to a `qubit_count`-qubit register
    ///
    /// # Errors
    /// Fails if the inputs do not fit the register or do not match the size
    /// of `base`
    pub fn new(qubit_count: usize, base: SimulatorMatrix, inputs: &[usize]) -> Result<Self> {
        let rearranger = BitRearranger::try_new(inputs, qubit_count)?;
        if base.count() != 1 << inputs.len() {
            return Err(qsim_core::QuantumError::InputCountMismatch {
                expected: base.count().trailing_zeros() as usize,
                actual: inputs.len(),
            }
            .into());
        }

        let equivalences = (0..1usize << qubit_count)
            .map(|index| {
                (
                    rearranger.rearrange_bits(index),
                    rearranger.remaining_bits(index),
                )
            })
            .collect();

        Ok(Self {
            qubit_count,
            base,
            inputs: inputs.to_vec(),
            rearranger,
            equivalences,
        })
    }

    /// Lift an extracted gate
    pub fn from_extracted(qubit_count: usize, gate: ExtractedGate) -> Result<Self> {
        let (base, inputs) = gate.into_parts();
        Self::new(qubit_count, base, &inputs)
    }

    /// Lift a plain matrix, such as a Kraus operator
    pub fn from_matrix(qubit_count: usize, matrix: Matrix, inputs: &[usize]) -> Result<Self> {
        Self::new(qubit_count, SimulatorMatrix::Raw(matrix), inputs)
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Rows (and columns) of the full matrix
    #[inline]
    pub fn count(&self) -> usize {
        self.equivalences.len()
    }

    /// Gate matrix on its own inputs
    #[inline]
    pub fn base(&self) -> &SimulatorMatrix {
        &self.base
    }

    #[inline]
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    #[inline]
    pub fn rearranger(&self) -> &BitRearranger {
        &self.rearranger
    }

    /// Gate-local index and remaining bits of register index `index`
    #[inline]
    pub fn equivalence(&self, index: usize) -> (usize, usize) {
        self.equivalences[index]
    }

    /// Element (`row`, `column`) of the full matrix
    #[inline]
    pub fn element(&self, row: usize, column: usize) -> Complex64 {
        let (base_row, remaining_row) = self.equivalences[row];
        let (base_column, remaining_column) = self.equivalences[column];
        if remaining_row == remaining_column {
            self.base.element(base_row, base_column)
        } else {
            ZERO
        }
    }

    /// Row `index` of the full matrix, built on `concurrency` threads
    pub fn row(&self, index: usize, concurrency: usize) -> Result<Vector> {
        let values = pool::fill_indexed(self.count(), concurrency, |column| {
            self.element(index, column)
        })?;
        Ok(Vector::new(values)?)
    }

    /// Materialize the full matrix, rows spread over `concurrency` threads
    ///
    /// # Errors
    /// [`SimulatorError::ZeroConcurrency`] if `concurrency` is zero
    pub fn expanded_raw_matrix(&self, concurrency: usize) -> Result<Matrix> {
        if concurrency == 0 {
            return Err(SimulatorError::ZeroConcurrency {
                knob: "expansion_concurrency",
            });
        }

        let count = self.count();
        let masks = self.rearranger.activation_masks();
        let rows = pool::fill_indexed(count, concurrency, |row| {
            let mut values = vec![ZERO; count];
            // only columns sharing the remaining bits can be non-zero
            let (base_row, remaining) = self.equivalences[row];
            for (local, &mask) in masks.iter().enumerate() {
                values[remaining | mask] = self.base.element(base_row, local);
            }
            values
        })?;
        Ok(Matrix::from_values(count, count, rows.concat())?)
    }
}
