//! Noise channels in Kraus form

use crate::gate::{Gate, Inputs};
use crate::matrices::{self, IDENTITY, NOT, PAULI_Y, PAULI_Z};
use qsim_core::{validate_inputs, Complex64, Matrix, QuantumError, Result};
use serde::{Deserialize, Serialize};

/// Quantum channel applied to a density matrix as `ρ' = Σ K ρ K†`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Noise {
    /// Flip `target` with `probability`
    BitFlip { probability: f64, target: usize },
    /// Apply Z to `target` with `probability`
    PhaseFlip { probability: f64, target: usize },
    /// Apply X, Y or Z to `target`, each with `probability / 3`
    Depolarizing { probability: f64, target: usize },
    /// Relax `target` towards |0⟩ with rate `gamma`
    AmplitudeDamping { gamma: f64, target: usize },
    /// Arbitrary Kraus operators over `inputs`
    Kraus { matrices: Vec<Matrix>, inputs: Vec<usize> },
}

impl Noise {
    pub fn bit_flip(probability: f64, target: usize) -> Self {
        Self::BitFlip {
            probability,
            target,
        }
    }

    pub fn phase_flip(probability: f64, target: usize) -> Self {
        Self::PhaseFlip {
            probability,
            target,
        }
    }

    pub fn depolarizing(probability: f64, target: usize) -> Self {
        Self::Depolarizing {
            probability,
            target,
        }
    }

    pub fn amplitude_damping(gamma: f64, target: usize) -> Self {
        Self::AmplitudeDamping { gamma, target }
    }

    pub fn kraus(matrices: Vec<Matrix>, inputs: Vec<usize>) -> Self {
        Self::Kraus {
            matrices,
            inputs,
        }
    }

    /// Kraus operators and inputs for a `qubit_count`-qubit circuit
    ///
    /// # Errors
    /// - [`QuantumError::InvalidNoise`] for probabilities outside `[0, 1]`,
    ///   an empty or mixed-size operator list, or operators whose `Σ K†K`
    ///   is not the identity within `tolerance`
    /// - the input errors of [`Gate::extract`]
    pub fn extract(&self, qubit_count: usize, tolerance: f64) -> Result<ExtractedNoise> {
        if qubit_count == 0 {
            return Err(QuantumError::EmptyQubitCount);
        }

        let (operators, inputs) = match self {
            Self::BitFlip {
                probability,
                target,
            } => (flip_channel(*probability, &NOT)?, Inputs::from_slice(&[*target])),
            Self::PhaseFlip {
                probability,
                target,
            } => (flip_channel(*probability, &PAULI_Z)?, Inputs::from_slice(&[*target])),
            Self::Depolarizing {
                probability,
                target,
            } => {
                let probability = checked_probability("depolarizing probability", *probability)?;
                let keep = Complex64::new((1.0 - probability).sqrt(), 0.0);
                let pauli = Complex64::new((probability / 3.0).sqrt(), 0.0);
                let operators = vec![
                    Matrix::from(IDENTITY).scaled(keep),
                    Matrix::from(NOT).scaled(pauli),
                    Matrix::from(PAULI_Y).scaled(pauli),
                    Matrix::from(PAULI_Z).scaled(pauli),
                ];
                (operators, Inputs::from_slice(&[*target]))
            }
            Self::AmplitudeDamping { gamma, target } => {
                let gamma = checked_probability("amplitude damping rate", *gamma)?;
                let zero = Complex64::new(0.0, 0.0);
                let one = Complex64::new(1.0, 0.0);
                let operators = vec![
                    Matrix::from([[one, zero], [zero, Complex64::new((1.0 - gamma).sqrt(), 0.0)]]),
                    Matrix::from([[zero, Complex64::new(gamma.sqrt(), 0.0)], [zero, zero]]),
                ];
                (operators, Inputs::from_slice(&[*target]))
            }
            Self::Kraus { matrices, inputs } => (matrices.clone(), Inputs::from_slice(inputs)),
        };

        let expected = operator_qubits(&operators, tolerance)?;
        if expected != inputs.len() {
            return Err(QuantumError::InputCountMismatch {
                expected,
                actual: inputs.len(),
            });
        }
        validate_inputs(&inputs, qubit_count)?;

        Ok(ExtractedNoise { operators, inputs })
    }
}

fn checked_probability(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(QuantumError::InvalidNoise(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}

fn flip_channel(probability: f64, flip: &[[Complex64; 2]; 2]) -> Result<Vec<Matrix>> {
    let probability = checked_probability("flip probability", probability)?;
    Ok(vec![
        Matrix::from(IDENTITY).scaled(Complex64::new((1.0 - probability).sqrt(), 0.0)),
        Matrix::from(*flip).scaled(Complex64::new(probability.sqrt(), 0.0)),
    ])
}

/// Qubit count shared by every operator, after checking completeness
fn operator_qubits(operators: &[Matrix], tolerance: f64) -> Result<usize> {
    let first = operators
        .first()
        .ok_or_else(|| QuantumError::InvalidNoise("no Kraus operators".to_string()))?;
    let qubits = first.qubit_count()?;

    let mut sum = Matrix::from_fn(first.rows(), first.columns(), |_, _| Complex64::new(0.0, 0.0))?;
    for operator in operators {
        if operator.rows() != first.rows() || operator.columns() != first.columns() {
            return Err(QuantumError::InvalidNoise(format!(
                "Kraus operators differ in size: {}x{} and {}x{}",
                first.rows(),
                first.columns(),
                operator.rows(),
                operator.columns()
            )));
        }
        sum = sum.add(&operator.conjugate_transposed().multiply(operator)?)?;
    }

    if !sum.is_approximately_identity(tolerance) {
        return Err(QuantumError::InvalidNoise(
            "Kraus operators do not satisfy Σ K†K = I".to_string(),
        ));
    }
    Ok(qubits)
}

/// Kraus operators and ordered inputs, validated against a circuit size
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedNoise {
    operators: Vec<Matrix>,
    inputs: Inputs,
}

impl ExtractedNoise {
    #[inline]
    pub fn operators(&self) -> &[Matrix] {
        &self.operators
    }

    #[inline]
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }
}

/// Step of a noisy circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    Gate(Gate),
    Noise(Noise),
}

impl Operator {
    /// Kraus operators of this step; a gate is the single operator U
    pub fn extract(&self, qubit_count: usize, tolerance: f64) -> Result<ExtractedNoise> {
        match self {
            Self::Gate(gate) => {
                let (matrix, inputs) = gate.extract(qubit_count, tolerance)?.into_parts();
                Ok(ExtractedNoise {
                    operators: vec![matrix.expanded_raw_matrix()?],
                    inputs,
                })
            }
            Self::Noise(noise) => noise.extract(qubit_count, tolerance),
        }
    }
}

impl From<Gate> for Operator {
    fn from(gate: Gate) -> Self {
        Self::Gate(gate)
    }
}

impl From<Noise> for Operator {
    fn from(noise: Noise) -> Self {
        Self::Noise(noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::TOLERANCE;

    #[test]
    fn test_standard_channels_are_complete() {
        for noise in [
            Noise::bit_flip(0.2, 0),
            Noise::phase_flip(0.7, 1),
            Noise::depolarizing(0.1, 0),
            Noise::amplitude_damping(0.4, 1),
        ] {
            let extracted = noise.extract(2, TOLERANCE).unwrap();
            assert_eq!(extracted.inputs().len(), 1);
        }
    }

    #[test]
    fn test_probability_out_of_range() {
        assert!(matches!(
            Noise::bit_flip(1.5, 0).extract(1, TOLERANCE),
            Err(QuantumError::InvalidNoise(_))
        ));
        assert!(matches!(
            Noise::amplitude_damping(-0.1, 0).extract(1, TOLERANCE),
            Err(QuantumError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_incomplete_kraus_rejected() {
        let noise = Noise::kraus(vec![matrices::hadamard().scaled(Complex64::new(0.5, 0.0))], vec![0]);
        assert!(matches!(
            noise.extract(1, TOLERANCE),
            Err(QuantumError::InvalidNoise(_))
        ));
        assert!(matches!(
            Noise::kraus(Vec::new(), vec![0]).extract(1, TOLERANCE),
            Err(QuantumError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_kraus_inputs_validated() {
        let noise = Noise::kraus(vec![matrices::cnot()], vec![0, 0]);
        assert_eq!(noise.extract(2, TOLERANCE), Err(QuantumError::DuplicateQubit(0)));
    }

    #[test]
    fn test_gate_operator_has_single_kraus_operator() {
        let operator = Operator::from(Gate::controlled_not(0, 1));
        let extracted = operator.extract(2, TOLERANCE).unwrap();
        assert_eq!(extracted.operators().len(), 1);
        assert_eq!(extracted.inputs(), &[1, 0]);
        assert!(extracted.operators()[0].is_approximately_equal(&matrices::cnot(), 1e-12));
    }
}
