//! Circuits: a gate list bound to a register size

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use crate::facade::{DensityMatrixSimulatorFacade, StatevectorSimulatorFacade, UnitarySimulatorFacade};
use qsim_core::Matrix;
use qsim_gates::{Gate, Operator};
use qsim_state::{DensityMatrix, Statevector};
use std::collections::BTreeMap;

/// Ordered gates on a fixed number of qubits
///
/// # Example
///
/// ```
/// use qsim_gates::Gate;
/// use qsim_sim::Circuit;
///
/// let circuit = Circuit::new(vec![Gate::hadamard(0), Gate::controlled_not(1, 0)], 2).unwrap();
/// let probabilities = circuit.summarized_probabilities("00").unwrap();
/// assert!((probabilities["00"] - 0.5).abs() < 1e-9);
/// assert!((probabilities["11"] - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    gates: Vec<Gate>,
    qubit_count: usize,
    config: SimulatorConfig,
}

impl Circuit {
    /// Circuit using the default (sequential) configuration
    ///
    /// # Errors
    /// [`SimulatorError::EmptyQubitCount`] if `qubit_count` is zero
    pub fn new(gates: Vec<Gate>, qubit_count: usize) -> Result<Self> {
        Self::with_config(gates, qubit_count, SimulatorConfig::default())
    }

    /// Circuit using `config`
    ///
    /// # Errors
    /// - [`SimulatorError::EmptyQubitCount`] if `qubit_count` is zero
    /// - configuration errors from [`SimulatorConfig::validate`]
    pub fn with_config(gates: Vec<Gate>, qubit_count: usize, config: SimulatorConfig) -> Result<Self> {
        if qubit_count == 0 {
            return Err(SimulatorError::EmptyQubitCount);
        }
        config.validate()?;
        Ok(Self {
            gates,
            qubit_count,
            config,
        })
    }

    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Final statevector starting from `|0…0⟩`
    pub fn statevector(&self) -> Result<Statevector> {
        self.statevector_from(Statevector::zero(self.qubit_count)?)
    }

    /// Final statevector starting from the basis state spelled by `bits`
    ///
    /// `bits` has one character per qubit, qubit 0 rightmost.
    pub fn statevector_after_inputting(&self, bits: &str) -> Result<Statevector> {
        self.statevector_from(initial_state(bits, self.qubit_count)?)
    }

    /// Final statevector starting from `initial`
    pub fn statevector_from(&self, initial: Statevector) -> Result<Statevector> {
        check_qubit_count(self.qubit_count, initial.qubit_count())?;
        StatevectorSimulatorFacade::from_config(&self.config)?.apply(&self.gates, initial)
    }

    /// Unitary of the whole circuit
    pub fn unitary(&self) -> Result<Matrix> {
        UnitarySimulatorFacade::from_config(&self.config)?.unitary(&self.gates, self.qubit_count)
    }

    /// Outcome probabilities of `qubits` after running on `bits`
    ///
    /// Outcome `o` reads `qubits[0]` as its most significant bit.
    pub fn measure(&self, qubits: &[usize], after_inputting: &str) -> Result<Vec<f64>> {
        Ok(self.statevector_after_inputting(after_inputting)?.measure(qubits)?)
    }

    /// Non-negligible basis state probabilities after running on `bits`
    pub fn summarized_probabilities(&self, after_inputting: &str) -> Result<BTreeMap<String, f64>> {
        Ok(self
            .statevector_after_inputting(after_inputting)?
            .summarized_probabilities())
    }
}

/// Gates interleaved with noise channels, simulated on density matrices
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseCircuit {
    operators: Vec<Operator>,
    qubit_count: usize,
    config: SimulatorConfig,
}

impl NoiseCircuit {
    /// Noisy circuit using the default configuration
    pub fn new(operators: Vec<Operator>, qubit_count: usize) -> Result<Self> {
        Self::with_config(operators, qubit_count, SimulatorConfig::default())
    }

    /// Noisy circuit using `config`
    pub fn with_config(
        operators: Vec<Operator>,
        qubit_count: usize,
        config: SimulatorConfig,
    ) -> Result<Self> {
        if qubit_count == 0 {
            return Err(SimulatorError::EmptyQubitCount);
        }
        config.validate()?;
        Ok(Self {
            operators,
            qubit_count,
            config,
        })
    }

    #[inline]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Final density matrix starting from `|0…0⟩⟨0…0|`
    pub fn density_matrix(&self) -> Result<DensityMatrix> {
        self.density_matrix_from(DensityMatrix::zero(self.qubit_count)?)
    }

    /// Final density matrix starting from the basis state spelled by `bits`
    pub fn density_matrix_after_inputting(&self, bits: &str) -> Result<DensityMatrix> {
        let initial = initial_state(bits, self.qubit_count)?;
        self.density_matrix_from(DensityMatrix::from_statevector(&initial))
    }

    /// Final density matrix starting from `initial`
    pub fn density_matrix_from(&self, initial: DensityMatrix) -> Result<DensityMatrix> {
        check_qubit_count(self.qubit_count, initial.qubit_count())?;
        DensityMatrixSimulatorFacade::from_config(&self.config)?.apply(&self.operators, initial)
    }

    /// Outcome probabilities of `qubits` after running on `bits`
    pub fn measure(&self, qubits: &[usize], after_inputting: &str) -> Result<Vec<f64>> {
        Ok(self
            .density_matrix_after_inputting(after_inputting)?
            .measure(qubits)?)
    }

    /// Non-negligible basis state probabilities after running on `bits`
    pub fn summarized_probabilities(&self, after_inputting: &str) -> Result<BTreeMap<String, f64>> {
        Ok(self
            .density_matrix_after_inputting(after_inputting)?
            .summarized_probabilities())
    }
}

fn initial_state(bits: &str, qubit_count: usize) -> Result<Statevector> {
    let state = Statevector::from_bits(bits)?;
    check_qubit_count(qubit_count, state.qubit_count())?;
    Ok(state)
}

fn check_qubit_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SimulatorError::QubitCountMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::QuantumError;
    use qsim_gates::Noise;

    #[test]
    fn test_empty_qubit_count_rejected() {
        assert_eq!(
            Circuit::new(vec![Gate::hadamard(0)], 0),
            Err(SimulatorError::EmptyQubitCount)
        );
        assert!(NoiseCircuit::new(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulatorConfig::new().with_tolerance(-1.0);
        assert!(Circuit::with_config(Vec::new(), 1, config).is_err());
    }

    #[test]
    fn test_input_width_must_match() {
        let circuit = Circuit::new(vec![Gate::hadamard(0)], 2).unwrap();
        assert_eq!(
            circuit.statevector_after_inputting("1"),
            Err(SimulatorError::QubitCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_failing_gate_is_reported_by_index() {
        let circuit = Circuit::new(
            vec![Gate::hadamard(0), Gate::not(0), Gate::controlled_not(0, 0)],
            2,
        )
        .unwrap();
        assert_eq!(
            circuit.statevector(),
            Err(SimulatorError::GateExtractionFailed {
                gate_index: 2,
                source: QuantumError::DuplicateQubit(0),
            })
        );
        assert!(matches!(
            circuit.unitary(),
            Err(SimulatorError::GateExtractionFailed { gate_index: 2, .. })
        ));
    }

    #[test]
    fn test_empty_circuit_is_identity() {
        let circuit = Circuit::new(Vec::new(), 2).unwrap();
        assert!(circuit.unitary().unwrap().is_approximately_identity(1e-12));
        assert_eq!(circuit.statevector().unwrap(), Statevector::zero(2).unwrap());
    }

    #[test]
    fn test_noise_circuit_reports_invalid_channel() {
        let circuit = NoiseCircuit::new(
            vec![Gate::hadamard(0).into(), Noise::bit_flip(2.0, 0).into()],
            1,
        )
        .unwrap();
        assert!(matches!(
            circuit.density_matrix(),
            Err(SimulatorError::GateExtractionFailed {
                gate_index: 1,
                source: QuantumError::InvalidNoise(_),
            })
        ));
    }
}
