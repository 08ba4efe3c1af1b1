//! Normalized pure quantum states

use crate::error::{Result, StateError};
use crate::measurement;
use qsim_core::{Complex64, Vector, TOLERANCE};
use serde::Serialize;
use std::collections::BTreeMap;

/// Pure state of a qubit register
///
/// Holds a [`Vector`] whose length is a power of two and whose squared
/// magnitudes sum to one within the tolerance it was built with.
///
/// # Example
/// ```
/// use qsim_state::Statevector;
///
/// let state = Statevector::from_bits("10").unwrap();
/// assert_eq!(state.qubit_count(), 2);
/// assert_eq!(state.probabilities()[0b10], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statevector {
    qubit_count: usize,
    vector: Vector,
}

impl Statevector {
    /// Validate `vector` as a statevector
    ///
    /// # Errors
    /// - [`StateError::InvalidDimension`] if the length is not a power of two
    /// - [`StateError::NotNormalized`] if `|Σ|vᵢ|² - 1| > tolerance`
    pub fn new(vector: Vector, tolerance: f64) -> Result<Self> {
        let dimension = vector.len();
        if !dimension.is_power_of_two() {
            return Err(StateError::InvalidDimension { dimension });
        }

        let squared_norm = vector.squared_norm();
        if (squared_norm - 1.0).abs() > tolerance {
            return Err(StateError::NotNormalized { squared_norm });
        }

        Ok(Self {
            qubit_count: dimension.trailing_zeros() as usize,
            vector,
        })
    }

    /// Validate raw amplitudes as a statevector
    pub fn from_amplitudes(amplitudes: Vec<Complex64>, tolerance: f64) -> Result<Self> {
        Self::new(Vector::new(amplitudes)?, tolerance)
    }

    /// Computational basis state `|index⟩`
    pub fn basis(qubit_count: usize, index: usize) -> Result<Self> {
        let dimension = dimension(qubit_count)?;
        Ok(Self {
            qubit_count,
            vector: Vector::basis(dimension, index)?,
        })
    }

    /// `|0…0⟩`
    pub fn zero(qubit_count: usize) -> Result<Self> {
        Self::basis(qubit_count, 0)
    }

    /// Basis state spelled as a bit string, qubit 0 rightmost
    ///
    /// # Errors
    /// [`StateError::InvalidBitString`] for empty strings or characters other
    /// than '0' and '1'
    pub fn from_bits(bits: &str) -> Result<Self> {
        if bits.is_empty() || !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(StateError::InvalidBitString(bits.to_string()));
        }
        let index = usize::from_str_radix(bits, 2)
            .map_err(|_| StateError::InvalidBitString(bits.to_string()))?;
        Self::basis(bits.len(), index)
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    #[inline]
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        self.vector.values()
    }

    pub fn into_vector(self) -> Vector {
        self.vector
    }

    /// Probability of every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes().iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probability of every outcome of `qubits`, `qubits[0]` most significant
    pub fn measure(&self, qubits: &[usize]) -> Result<Vec<f64>> {
        measurement::marginal_probabilities(&self.probabilities(), self.qubit_count, qubits)
    }

    /// Non-negligible outcomes keyed by bit string, qubit 0 rightmost
    pub fn summarized_probabilities(&self) -> BTreeMap<String, f64> {
        measurement::summarize(&self.probabilities(), self.qubit_count, TOLERANCE)
    }

    /// Fidelity |⟨self|other⟩|²
    pub fn fidelity(&self, other: &Statevector) -> Result<f64> {
        Ok(self.vector.inner_product(&other.vector)?.norm_sqr())
    }
}

pub(crate) fn dimension(qubit_count: usize) -> Result<usize> {
    if qubit_count == 0 || qubit_count >= usize::BITS as usize {
        return Err(StateError::InvalidDimension {
            dimension: qubit_count,
        });
    }
    Ok(1 << qubit_count)
}
