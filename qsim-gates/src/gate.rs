//! Quantum gate definitions and matrix extraction

use crate::matrices::{self, Axis};
use crate::simulator_matrix::{OracleMatrix, SimulatorMatrix};
use crate::truth_table::TruthTable;
use qsim_core::{validate_inputs, Matrix, QuantumError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Ordered gate inputs; most gates touch one to three qubits
pub type Inputs = SmallVec<[usize; 4]>;

/// A quantum gate and the qubits it acts on
///
/// Gates are plain values. Nothing is validated when they are built; every
/// invariant (unitary matrix, input count, unique in-range inputs) is checked
/// by [`Gate::extract`] against a concrete circuit size.
///
/// # Example
/// ```
/// use qsim_gates::Gate;
///
/// let bell = vec![Gate::hadamard(0), Gate::controlled_not(1, 0)];
/// let extracted = bell[1].extract(2, qsim_core::TOLERANCE).unwrap();
/// assert_eq!(extracted.inputs(), &[0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard on `target`
    Hadamard { target: usize },
    /// NOT (Pauli-X) on `target`
    Not { target: usize },
    /// Phase shift diag(1, e^(iθ)) on `target`
    PhaseShift { radians: f64, target: usize },
    /// Rotation around an axis of the Bloch sphere
    Rotation {
        axis: Axis,
        radians: f64,
        target: usize,
    },
    /// Arbitrary matrix; `inputs[0]` is its most significant input
    Matrix { matrix: Matrix, inputs: Vec<usize> },
    /// `gate` applied when every control is one
    Controlled { gate: Box<Gate>, controls: Vec<usize> },
    /// Matrix gate with a single control
    ControlledMatrix {
        matrix: Matrix,
        inputs: Vec<usize>,
        control: usize,
    },
    /// `gate` applied when the controls match an entry of `truth_table`
    Oracle {
        truth_table: Vec<String>,
        controls: Vec<usize>,
        gate: Box<Gate>,
    },
}

impl Gate {
    /// Hadamard gate
    pub fn hadamard(target: usize) -> Self {
        Self::Hadamard { target }
    }

    /// Hadamard on every target
    pub fn hadamards(targets: impl IntoIterator<Item = usize>) -> Vec<Self> {
        targets.into_iter().map(Self::hadamard).collect()
    }

    /// NOT gate
    pub fn not(target: usize) -> Self {
        Self::Not { target }
    }

    /// NOT on every target
    pub fn nots(targets: impl IntoIterator<Item = usize>) -> Vec<Self> {
        targets.into_iter().map(Self::not).collect()
    }

    /// Phase shift gate
    pub fn phase_shift(radians: f64, target: usize) -> Self {
        Self::PhaseShift { radians, target }
    }

    /// Rotation gate
    pub fn rotation(axis: Axis, radians: f64, target: usize) -> Self {
        Self::Rotation {
            axis,
            radians,
            target,
        }
    }

    /// Gate defined by an explicit matrix
    pub fn matrix(matrix: Matrix, inputs: Vec<usize>) -> Self {
        Self::Matrix {
            matrix,
            inputs,
        }
    }

    /// `gate` controlled by every qubit in `controls`
    pub fn controlled(gate: Gate, controls: Vec<usize>) -> Self {
        Self::Controlled {
            gate: Box::new(gate),
            controls,
        }
    }

    /// Matrix gate with one control
    pub fn controlled_matrix(matrix: Matrix, inputs: Vec<usize>, control: usize) -> Self {
        Self::ControlledMatrix {
            matrix,
            inputs,
            control,
        }
    }

    /// CNOT flipping `target` when `control` is one
    pub fn controlled_not(target: usize, control: usize) -> Self {
        Self::controlled(Self::not(target), vec![control])
    }

    /// `gate` activated by the patterns in `truth_table`
    pub fn oracle<S: Into<String>>(
        truth_table: impl IntoIterator<Item = S>,
        controls: Vec<usize>,
        gate: Gate,
    ) -> Self {
        Self::Oracle {
            truth_table: truth_table.into_iter().map(Into::into).collect(),
            controls,
            gate: Box::new(gate),
        }
    }

    /// Quantum Fourier transform over `inputs`
    pub fn quantum_fourier_transform(inputs: Vec<usize>, inverse: bool) -> Result<Self> {
        let matrix = matrices::quantum_fourier_transform(dimension(inputs.len())?, inverse)?;
        Ok(Self::matrix(matrix, inputs))
    }

    /// Inversion about the mean over `inputs`
    pub fn inversion_about_mean(inputs: Vec<usize>) -> Result<Self> {
        let matrix = matrices::inversion_about_mean(dimension(inputs.len())?)?;
        Ok(Self::matrix(matrix, inputs))
    }

    /// Short name used in logs and diagrams
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hadamard { .. } => "H",
            Self::Not { .. } => "X",
            Self::PhaseShift { .. } => "P",
            Self::Rotation { axis: Axis::X, .. } => "RX",
            Self::Rotation { axis: Axis::Y, .. } => "RY",
            Self::Rotation { axis: Axis::Z, .. } => "RZ",
            Self::Matrix { .. } => "U",
            Self::Controlled { .. } | Self::ControlledMatrix { .. } => "C",
            Self::Oracle { .. } => "ORACLE",
        }
    }

    /// Normalised matrix and ordered inputs for a `qubit_count`-qubit circuit
    ///
    /// Controlled gates become oracles whose only pattern is all ones, and
    /// nested oracles collapse into one oracle whose truth table concatenates
    /// outer and inner entries. Controls always precede the inner inputs.
    ///
    /// # Errors
    /// - [`QuantumError::EmptyQubitCount`] if `qubit_count` is zero
    /// - [`QuantumError::EmptyControls`] for controlled gates without controls
    /// - truth table errors for malformed oracle entries
    /// - [`QuantumError::NotSquare`] / [`QuantumError::NotPowerOfTwo`] for bad matrix shapes
    /// - [`QuantumError::InputCountMismatch`] if the matrix size disagrees with the inputs
    /// - [`QuantumError::NotUnitary`] if the matrix is not unitary within `tolerance`
    /// - [`QuantumError::GateSpansTooManyQubits`], [`QuantumError::InvalidQubit`]
    ///   or [`QuantumError::DuplicateQubit`] for inputs that do not fit the circuit
    pub fn extract(&self, qubit_count: usize, tolerance: f64) -> Result<ExtractedGate> {
        if qubit_count == 0 {
            return Err(QuantumError::EmptyQubitCount);
        }

        let (matrix, inputs) = self.components(qubit_count)?;

        let control_count = matrix.truth_table().map_or(0, TruthTable::control_count);
        let expected = matrix.base().qubit_count()? + control_count;
        if expected != inputs.len() {
            return Err(QuantumError::InputCountMismatch {
                expected,
                actual: inputs.len(),
            });
        }
        if !matrix.is_approximately_unitary(tolerance) {
            return Err(QuantumError::NotUnitary { tolerance });
        }
        validate_inputs(&inputs, qubit_count)?;

        Ok(ExtractedGate { matrix, inputs })
    }

    fn components(&self, qubit_count: usize) -> Result<(SimulatorMatrix, Inputs)> {
        let single = |matrix: Matrix, target: usize| -> Result<(SimulatorMatrix, Inputs)> {
            Ok((SimulatorMatrix::Raw(matrix), Inputs::from_slice(&[target])))
        };

        match self {
            Self::Hadamard { target } => single(matrices::hadamard(), *target),
            Self::Not { target } => single(matrices::not(), *target),
            Self::PhaseShift { radians, target } => single(matrices::phase_shift(*radians), *target),
            Self::Rotation {
                axis,
                radians,
                target,
            } => single(matrices::rotation(*axis, *radians), *target),
            Self::Matrix { matrix, inputs } => Ok((
                SimulatorMatrix::Raw(matrix.clone()),
                Inputs::from_slice(inputs),
            )),
            Self::ControlledMatrix {
                matrix,
                inputs,
                control,
            } => {
                let inner = (SimulatorMatrix::Raw(matrix.clone()), Inputs::from_slice(inputs));
                wrap(TruthTable::all_ones(1)?, &[*control], inner, qubit_count)
            }
            Self::Controlled { gate, controls } => {
                let table = TruthTable::all_ones(controls.len())?;
                wrap(table, controls, gate.components(qubit_count)?, qubit_count)
            }
            Self::Oracle {
                truth_table,
                controls,
                gate,
            } => {
                let table = TruthTable::new(truth_table, controls.len())?;
                wrap(table, controls, gate.components(qubit_count)?, qubit_count)
            }
        }
    }
}

/// Put `inner` under `controls` activated by `table`
///
/// Inputs wider than the circuit are rejected before the truth tables are
/// combined.
fn wrap(
    table: TruthTable,
    controls: &[usize],
    (inner, inner_inputs): (SimulatorMatrix, Inputs),
    qubit_count: usize,
) -> Result<(SimulatorMatrix, Inputs)> {
    let mut inputs = Inputs::from_slice(controls);
    inputs.extend_from_slice(&inner_inputs);
    if inputs.len() > qubit_count {
        return Err(QuantumError::GateSpansTooManyQubits {
            gate_qubits: inputs.len(),
            qubit_count,
        });
    }

    let oracle = match inner {
        SimulatorMatrix::Raw(matrix) => OracleMatrix::new(table, matrix)?,
        SimulatorMatrix::Oracle(oracle) => oracle.wrapped_by(&table)?,
    };
    Ok((SimulatorMatrix::Oracle(oracle), inputs))
}

fn dimension(input_count: usize) -> Result<usize> {
    if input_count == 0 || input_count >= usize::BITS as usize {
        return Err(QuantumError::InputCountMismatch {
            expected: 1,
            actual: input_count,
        });
    }
    Ok(1 << input_count)
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hadamard { target } | Self::Not { target } => {
                write!(f, "{}(q{})", self.name(), target)
            }
            Self::PhaseShift { radians, target } | Self::Rotation { radians, target, .. } => {
                write!(f, "{}({:.4}, q{})", self.name(), radians, target)
            }
            Self::Matrix { matrix, inputs } => {
                write!(f, "U{}x{}{:?}", matrix.rows(), matrix.columns(), inputs)
            }
            Self::ControlledMatrix {
                matrix,
                inputs,
                control,
            } => write!(
                f,
                "C[q{}](U{}x{}{:?})",
                control,
                matrix.rows(),
                matrix.columns(),
                inputs
            ),
            Self::Controlled { gate, controls } => write!(f, "C{:?}({})", controls, gate),
            Self::Oracle {
                truth_table,
                controls,
                gate,
            } => write!(f, "ORACLE{:?}{:?}({})", truth_table, controls, gate),
        }
    }
}

/// Gate matrix and ordered inputs, validated against a circuit size
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedGate {
    matrix: SimulatorMatrix,
    inputs: Inputs,
}

impl ExtractedGate {
    /// Gate matrix on its own inputs
    #[inline]
    pub fn matrix(&self) -> &SimulatorMatrix {
        &self.matrix
    }

    /// Inputs, most significant first
    #[inline]
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Activation patterns, for oracle and controlled gates
    pub fn truth_table(&self) -> Option<&TruthTable> {
        self.matrix.truth_table()
    }

    /// Split into matrix and inputs
    pub fn into_parts(self) -> (SimulatorMatrix, Inputs) {
        (self.matrix, self.inputs)
    }
}
