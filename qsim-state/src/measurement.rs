//! Computational basis probabilities shared by every state representation
//!
//! Basis state `index` assigns bit `q` of `index` to qubit `q`, so bit strings
//! print qubit 0 as the rightmost character.

use crate::error::Result;
use qsim_core::validate_inputs;
use std::collections::BTreeMap;

/// Probability of every outcome of `qubits`
///
/// Outcome `o` reads `qubits[0]` as its most significant bit. Probabilities
/// of basis states that agree on the measured qubits are added together.
///
/// # Errors
/// Fails if `qubits` repeats a qubit or names one outside the register
pub fn marginal_probabilities(
    probabilities: &[f64],
    qubit_count: usize,
    qubits: &[usize],
) -> Result<Vec<f64>> {
    validate_inputs(qubits, qubit_count)?;

    let mut outcomes = vec![0.0; 1 << qubits.len()];
    for (index, probability) in probabilities.iter().enumerate() {
        let outcome = qubits
            .iter()
            .fold(0, |outcome, &qubit| (outcome << 1) | ((index >> qubit) & 1));
        outcomes[outcome] += probability;
    }
    Ok(outcomes)
}

/// Outcomes above `tolerance`, keyed by bit string
pub fn summarize(probabilities: &[f64], qubit_count: usize, tolerance: f64) -> BTreeMap<String, f64> {
    probabilities
        .iter()
        .enumerate()
        .filter(|(_, &probability)| probability > tolerance)
        .map(|(index, &probability)| (bit_string(index, qubit_count), probability))
        .collect()
}

/// `index` as a `width`-character bit string, qubit 0 rightmost
#[inline]
pub fn bit_string(index: usize, width: usize) -> String {
    format!("{:0width$b}", index, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsim_core::QuantumError;

    #[test]
    fn test_marginal_orders_outcome_bits() {
        // |q1 q0⟩ = |01⟩ with certainty
        let probabilities = [0.0, 1.0, 0.0, 0.0];
        let first = marginal_probabilities(&probabilities, 2, &[0, 1]).unwrap();
        assert_eq!(first, vec![0.0, 0.0, 1.0, 0.0]);
        let second = marginal_probabilities(&probabilities, 2, &[1, 0]).unwrap();
        assert_eq!(second, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_marginal_sums_unmeasured_qubits() {
        let probabilities = [0.1, 0.2, 0.3, 0.4];
        let outcomes = marginal_probabilities(&probabilities, 2, &[1]).unwrap();
        assert_relative_eq!(outcomes[0], 0.3);
        assert_relative_eq!(outcomes[1], 0.7);
    }

    #[test]
    fn test_marginal_rejects_bad_qubits() {
        let probabilities = [0.5, 0.5];
        assert_eq!(
            marginal_probabilities(&probabilities, 1, &[1]),
            Err(QuantumError::InvalidQubit(1, 1).into())
        );
    }

    #[test]
    fn test_summarize_skips_negligible_outcomes() {
        let summary = summarize(&[0.5, 1e-9, 0.0, 0.5], 2, 1e-6);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary["00"], 0.5);
        assert_eq!(summary["11"], 0.5);
    }

    #[test]
    fn test_bit_string_width() {
        assert_eq!(bit_string(1, 3), "001");
        assert_eq!(bit_string(6, 3), "110");
    }
}
