//! Error types for the simulator

use qsim_core::QuantumError;
use qsim_state::StateError;
use std::fmt;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    InvalidConfig(String),

    /// A concurrency knob was set to zero
    ZeroConcurrency { knob: &'static str },

    /// Circuit declared without qubits
    EmptyQubitCount,

    /// Initial state does not match the circuit
    QubitCountMismatch { expected: usize, actual: usize },

    /// Gate could not be turned into a valid matrix
    GateExtractionFailed {
        gate_index: usize,
        source: QuantumError,
    },

    /// State left invalid after applying a gate
    StateValidationFailed {
        gate_index: usize,
        source: StateError,
    },

    /// Composed circuit matrix is not unitary
    NotUnitary { tolerance: f64 },

    /// Worker pool could not be built
    ThreadPool(String),

    /// Matrix or vector error outside gate extraction
    Quantum(QuantumError),

    /// State error outside gate application
    State(StateError),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            SimulatorError::ZeroConcurrency { knob } => {
                write!(f, "Invalid configuration: {} must be at least 1", knob)
            }
            SimulatorError::EmptyQubitCount => {
                write!(f, "Invalid circuit: qubit count must be at least 1")
            }
            SimulatorError::QubitCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Invalid initial state: circuit has {} qubits, state has {}",
                    expected, actual
                )
            }
            SimulatorError::GateExtractionFailed { gate_index, source } => {
                write!(f, "Gate {} is invalid: {}", gate_index, source)
            }
            SimulatorError::StateValidationFailed { gate_index, source } => {
                write!(f, "State invalid after gate {}: {}", gate_index, source)
            }
            SimulatorError::NotUnitary { tolerance } => {
                write!(
                    f,
                    "Circuit matrix is not unitary within tolerance {}",
                    tolerance
                )
            }
            SimulatorError::ThreadPool(msg) => {
                write!(f, "Thread pool creation failed: {}", msg)
            }
            SimulatorError::Quantum(err) => write!(f, "{}", err),
            SimulatorError::State(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::GateExtractionFailed { source, .. } => Some(source),
            SimulatorError::StateValidationFailed { source, .. } => Some(source),
            SimulatorError::Quantum(err) => Some(err),
            SimulatorError::State(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuantumError> for SimulatorError {
    fn from(err: QuantumError) -> Self {
        SimulatorError::Quantum(err)
    }
}

impl From<StateError> for SimulatorError {
    fn from(err: StateError) -> Self {
        SimulatorError::State(err)
    }
}
