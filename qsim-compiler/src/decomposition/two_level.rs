//! Two-level decomposition of multi-qubit gates
//!
//! A `2^k × 2^k` unitary `W` is reduced to the identity by a sequence of
//! two-level unitaries `V_m ⋯ V_1 · W = I`, each acting on two basis states
//! only. Walking the basis in Gray-code order makes every such pair differ in
//! exactly one bit, so each `V_j` is a single-qubit gate on that bit,
//! controlled by all the other inputs. Controls that must be zero are
//! bracketed by NOT gates.
//!
//! `W = V_1† ⋯ V_m†`, so the emitted circuit applies `V_m†` first.

use super::gray_code::{changed_bit, gray_code_sequence};
use super::single_qubit::SingleQubitDecomposer;
use qsim_core::{Complex64, Matrix, QuantumError, Result, Vector, TOLERANCE};
use qsim_gates::Gate;
use tracing::debug;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2×2 unitary acting on basis states `first` and `second` of a gate
#[derive(Debug, Clone, PartialEq)]
struct TwoLevelStep {
    first: usize,
    second: usize,
    matrix: Matrix,
}

/// Rewrites gates as NOT gates and controlled single-qubit gates
///
/// # Example
///
/// ```
/// use qsim_compiler::TwoLevelDecompositionSolver;
/// use qsim_gates::Gate;
///
/// let solver = TwoLevelDecompositionSolver::default();
/// let qft = Gate::quantum_fourier_transform(vec![0, 1], false).unwrap();
/// let gates = solver.decompose(&qft, 2).unwrap();
/// assert!(gates
///     .iter()
///     .all(|gate| matches!(gate, Gate::Not { .. } | Gate::Controlled { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoLevelDecompositionSolver {
    single_qubit: SingleQubitDecomposer,
    tolerance: f64,
}

impl Default for TwoLevelDecompositionSolver {
    fn default() -> Self {
        Self::new(SingleQubitDecomposer::default(), TOLERANCE)
    }
}

impl TwoLevelDecompositionSolver {
    /// Solver emitting single-qubit gates through `single_qubit`
    ///
    /// Two-level steps within `tolerance` of the identity are skipped.
    pub fn new(single_qubit: SingleQubitDecomposer, tolerance: f64) -> Self {
        Self {
            single_qubit,
            tolerance,
        }
    }

    #[inline]
    pub fn single_qubit(&self) -> &SingleQubitDecomposer {
        &self.single_qubit
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Gates equivalent to `gate` on a `qubit_count`-qubit register
    ///
    /// # Errors
    /// Fails if `gate` does not extract on `qubit_count` qubits
    pub fn decompose(&self, gate: &Gate, qubit_count: usize) -> Result<Vec<Gate>> {
        let extracted = gate.extract(qubit_count, self.tolerance)?;
        let matrix = extracted.matrix().expanded_raw_matrix()?;
        self.decompose_matrix(&matrix, extracted.inputs())
    }

    /// Gates equivalent to `matrix` acting on `inputs`
    ///
    /// `inputs[0]` is the most significant bit of the matrix index.
    ///
    /// # Errors
    /// - [`QuantumError::NotSquare`] / [`QuantumError::NotPowerOfTwo`] for
    ///   malformed matrices
    /// - [`QuantumError::InputCountMismatch`] if `inputs` does not match the
    ///   matrix size
    /// - [`QuantumError::NotUnitary`] if `matrix` is not unitary
    pub fn decompose_matrix(&self, matrix: &Matrix, inputs: &[usize]) -> Result<Vec<Gate>> {
        let input_count = matrix.qubit_count()?;
        if input_count != inputs.len() {
            return Err(QuantumError::InputCountMismatch {
                expected: input_count,
                actual: inputs.len(),
            });
        }
        if input_count == 0 {
            return Ok(Vec::new());
        }
        if !matrix.is_approximately_unitary(self.tolerance) {
            return Err(QuantumError::NotUnitary {
                tolerance: self.tolerance,
            });
        }
        if input_count == 1 {
            return self.single_qubit.decompose(matrix, inputs[0]);
        }

        let steps = self.two_level_steps(matrix)?;
        debug!(
            "Decomposed {}x{} unitary on {:?} into {} two-level steps",
            matrix.rows(),
            matrix.columns(),
            inputs,
            steps.len()
        );

        let mut gates = Vec::new();
        for step in steps.iter().rev() {
            gates.extend(self.step_gates(step, inputs)?);
        }
        Ok(gates)
    }

    /// Steps `V_1 … V_m` with `V_m ⋯ V_1 · matrix = I`
    fn two_level_steps(&self, matrix: &Matrix) -> Result<Vec<TwoLevelStep>> {
        let count = matrix.rows();
        let order = gray_code_sequence(count);
        let mut values = matrix.values().to_vec();
        let mut steps = Vec::new();

        for position in 0..count - 1 {
            let column = order[position];
            // zero the column from the bottom up; each step folds row
            // order[row] into its Gray-code predecessor
            for row in (position + 1..count).rev() {
                let first = order[row - 1];
                let second = order[row];
                let pair = Vector::new(vec![
                    values[first * count + column],
                    values[second * count + column],
                ])?;
                let elimination = pair.elimination_matrix()?;
                if elimination.is_approximately_identity(self.tolerance) {
                    continue;
                }
                apply_rows(&mut values, count, first, second, &elimination);
                steps.push(TwoLevelStep {
                    first,
                    second,
                    matrix: elimination,
                });
            }
        }

        // every column but the last is now a real unit basis vector; the last
        // diagonal entry carries the remaining phase
        let last = order[count - 1];
        let phase = values[last * count + last].arg();
        if phase.abs() > self.tolerance {
            steps.push(TwoLevelStep {
                first: order[count - 2],
                second: last,
                matrix: Matrix::from([[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, -phase)]]),
            });
        }

        Ok(steps)
    }

    /// `NOT(inactive) · C(step†) · NOT(inactive)` for one step
    fn step_gates(&self, step: &TwoLevelStep, inputs: &[usize]) -> Result<Vec<Gate>> {
        let width = inputs.len();
        let target_bit = changed_bit(step.first, step.second).unwrap_or_else(|| {
            unreachable!("Gray-code neighbours differ in exactly one bit")
        });
        let qubit = |bit: usize| inputs[width - 1 - bit];

        // |0⟩ on the target must be the basis state with the bit cleared
        let oriented = if (step.first >> target_bit) & 1 == 0 {
            step.matrix.clone()
        } else {
            let m = &step.matrix;
            Matrix::from([[m[(1, 1)], m[(1, 0)]], [m[(0, 1)], m[(0, 0)]]])
        };

        let single = self
            .single_qubit
            .decompose(&oriented.conjugate_transposed(), qubit(target_bit))?;
        if single.is_empty() {
            return Ok(Vec::new());
        }

        let control_bits = (0..width).filter(|&bit| bit != target_bit);
        let controls: Vec<usize> = control_bits.clone().map(qubit).collect();
        let inactive: Vec<usize> = control_bits
            .filter(|&bit| (step.first >> bit) & 1 == 0)
            .map(qubit)
            .collect();

        let mut gates = Gate::nots(inactive.iter().copied());
        gates.extend(
            single
                .into_iter()
                .map(|gate| Gate::controlled(gate, controls.clone())),
        );
        gates.extend(Gate::nots(inactive));
        Ok(gates)
    }
}

/// Replace rows `first` and `second` of a `count × count` matrix by
/// `two_level · [row_first; row_second]`
fn apply_rows(values: &mut [Complex64], count: usize, first: usize, second: usize, two_level: &Matrix) {
    for column in 0..count {
        let a = values[first * count + column];
        let b = values[second * count + column];
        values[first * count + column] = two_level[(0, 0)] * a + two_level[(0, 1)] * b;
        values[second * count + column] = two_level[(1, 0)] * a + two_level[(1, 1)] * b;
    }
}
