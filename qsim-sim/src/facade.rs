//! Fold a gate sequence into a final state
//!
//! Each facade extracts gate `i`, lifts it to the register, applies its
//! strategy and validates the result before moving on to gate `i + 1`. The
//! first failure stops the run and names the gate that caused it.

use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use crate::register::{DensityMatrixRegister, StatevectorRegister, UnitaryRegister};
use crate::transformation::{StatevectorTransformation, UnitaryTransformation};
use qsim_core::Matrix;
use qsim_gates::{Gate, Operator};
use qsim_state::{DensityMatrix, Statevector};
use std::sync::Arc;
use tracing::debug;

/// Extract gate `gate_index` and lift it to the register
fn lift(
    gate_index: usize,
    gate: &Gate,
    qubit_count: usize,
    tolerance: f64,
) -> Result<CircuitSimulatorMatrix> {
    let extracted = gate
        .extract(qubit_count, tolerance)
        .map_err(|source| SimulatorError::GateExtractionFailed { gate_index, source })?;
    CircuitSimulatorMatrix::from_extracted(qubit_count, extracted)
        .map_err(|err| provenance(gate_index, err))
}

/// Attach the gate index to errors raised while applying gate `gate_index`
fn provenance(gate_index: usize, err: SimulatorError) -> SimulatorError {
    match err {
        SimulatorError::Quantum(source) => SimulatorError::GateExtractionFailed { gate_index, source },
        SimulatorError::State(source) => SimulatorError::StateValidationFailed { gate_index, source },
        other => other,
    }
}

/// Runs gates against a statevector
#[derive(Clone)]
pub struct StatevectorSimulatorFacade {
    transformation: Arc<dyn StatevectorTransformation>,
    tolerance: f64,
}

impl StatevectorSimulatorFacade {
    pub fn new(transformation: Arc<dyn StatevectorTransformation>, tolerance: f64) -> Self {
        Self {
            transformation,
            tolerance,
        }
    }

    /// Facade using the configured statevector strategy
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.statevector_mode.statevector_transformation()?,
            config.tolerance,
        ))
    }

    /// Apply `gates` in order, starting from `initial`
    ///
    /// # Errors
    /// - [`SimulatorError::GateExtractionFailed`] for the first invalid gate
    /// - [`SimulatorError::StateValidationFailed`] if a gate leaves the state
    ///   unnormalized
    pub fn apply(&self, gates: &[Gate], initial: Statevector) -> Result<Statevector> {
        let qubit_count = initial.qubit_count();
        let mut register =
            StatevectorRegister::new(initial, Arc::clone(&self.transformation), self.tolerance);

        for (gate_index, gate) in gates.iter().enumerate() {
            debug!(
                "Applying gate {}/{} to statevector: {}",
                gate_index + 1,
                gates.len(),
                gate
            );
            let matrix = lift(gate_index, gate, qubit_count, self.tolerance)?;
            register = register
                .applying(&matrix)
                .map_err(|err| provenance(gate_index, err))?;
        }

        Ok(register.into_state())
    }
}

/// Composes gates into the unitary of the whole circuit
#[derive(Clone)]
pub struct UnitarySimulatorFacade {
    transformation: Arc<dyn UnitaryTransformation>,
    tolerance: f64,
}

impl UnitarySimulatorFacade {
    pub fn new(transformation: Arc<dyn UnitaryTransformation>, tolerance: f64) -> Self {
        Self {
            transformation,
            tolerance,
        }
    }

    /// Facade using the configured unitary strategy
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.unitary_mode.unitary_transformation()?,
            config.tolerance,
        ))
    }

    /// Unitary of `gates` on a `qubit_count`-qubit register
    ///
    /// Gate matrices are checked at extraction; the composed matrix is
    /// checked once at the end.
    ///
    /// # Errors
    /// - [`SimulatorError::EmptyQubitCount`] if `qubit_count` is zero
    /// - [`SimulatorError::GateExtractionFailed`] for the first invalid gate
    /// - [`SimulatorError::NotUnitary`] if rounding broke unitarity
    pub fn unitary(&self, gates: &[Gate], qubit_count: usize) -> Result<Matrix> {
        if qubit_count == 0 || qubit_count >= usize::BITS as usize {
            return Err(SimulatorError::EmptyQubitCount);
        }

        let identity = Matrix::identity(1 << qubit_count)?;
        let mut register = UnitaryRegister::new(identity, Arc::clone(&self.transformation));

        for (gate_index, gate) in gates.iter().enumerate() {
            debug!(
                "Applying gate {}/{} to unitary: {}",
                gate_index + 1,
                gates.len(),
                gate
            );
            let matrix = lift(gate_index, gate, qubit_count, self.tolerance)?;
            register = register
                .applying(&matrix)
                .map_err(|err| provenance(gate_index, err))?;
        }

        let unitary = register.into_matrix();
        if !unitary.is_approximately_unitary(self.tolerance) {
            return Err(SimulatorError::NotUnitary {
                tolerance: self.tolerance,
            });
        }
        Ok(unitary)
    }
}

/// Runs gates and noise channels against a density matrix
#[derive(Clone)]
pub struct DensityMatrixSimulatorFacade {
    transformation: Arc<dyn UnitaryTransformation>,
    tolerance: f64,
}

impl DensityMatrixSimulatorFacade {
    pub fn new(transformation: Arc<dyn UnitaryTransformation>, tolerance: f64) -> Self {
        Self {
            transformation,
            tolerance,
        }
    }

    /// Facade using the configured density matrix strategy
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.density_matrix_mode.unitary_transformation()?,
            config.tolerance,
        ))
    }

    /// Apply `operators` in order, starting from `initial`
    ///
    /// # Errors
    /// - [`SimulatorError::GateExtractionFailed`] for the first invalid gate
    ///   or noise channel
    /// - [`SimulatorError::StateValidationFailed`] if an operator leaves an
    ///   invalid density matrix
    pub fn apply(&self, operators: &[Operator], initial: DensityMatrix) -> Result<DensityMatrix> {
        let qubit_count = initial.qubit_count();
        let mut register =
            DensityMatrixRegister::new(initial, Arc::clone(&self.transformation), self.tolerance);

        for (gate_index, operator) in operators.iter().enumerate() {
            let extracted = operator
                .extract(qubit_count, self.tolerance)
                .map_err(|source| SimulatorError::GateExtractionFailed { gate_index, source })?;
            debug!(
                "Applying operator {}/{} to density matrix: {} Kraus operator(s) on {:?}",
                gate_index + 1,
                operators.len(),
                extracted.operators().len(),
                extracted.inputs()
            );

            let matrices = extracted
                .operators()
                .iter()
                .map(|kraus| {
                    CircuitSimulatorMatrix::from_matrix(qubit_count, kraus.clone(), extracted.inputs())
                })
                .collect::<Result<Vec<_>>>()
                .map_err(|err| provenance(gate_index, err))?;
            register = register
                .applying(&matrices)
                .map_err(|err| provenance(gate_index, err))?;
        }

        Ok(register.into_state())
    }
}
