//! Immutable dense complex vector

use crate::{Matrix, QuantumError, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Fixed-length sequence of complex amplitudes
///
/// A `Vector` is never empty and never mutated after construction; every
/// operation returns a new instance.
///
/// # Example
/// ```
/// use qsim_core::{Complex64, Vector};
///
/// let v = Vector::new(vec![Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)]).unwrap();
/// assert!((v.squared_norm() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    values: Vec<Complex64>,
}

impl Vector {
    /// Create a vector from its elements
    ///
    /// # Errors
    /// Returns [`QuantumError::Empty`] if `values` is empty
    pub fn new(values: Vec<Complex64>) -> Result<Self> {
        if values.is_empty() {
            return Err(QuantumError::Empty("Vector"));
        }
        Ok(Self { values })
    }

    /// Vector of `count` zeros with a single one at `index`
    pub fn basis(count: usize, index: usize) -> Result<Self> {
        if index >= count {
            return Err(QuantumError::OutOfRange(format!(
                "basis index {} for vector of length {}",
                index, count
            )));
        }
        let mut values = vec![ZERO; count];
        values[index] = Complex64::new(1.0, 0.0);
        Self::new(values)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element at `index`, if any
    #[inline]
    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.values.get(index).copied()
    }

    /// Borrow the elements
    #[inline]
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Consume the vector and return its elements
    pub fn into_values(self) -> Vec<Complex64> {
        self.values
    }

    /// Sum of squared magnitudes
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v.norm_sqr()).sum()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Element-wise complex conjugate
    pub fn conjugated(&self) -> Self {
        Self {
            values: self.values.iter().map(|v| v.conj()).collect(),
        }
    }

    /// Multiply every element by `factor`
    pub fn scaled(&self, factor: Complex64) -> Self {
        Self {
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Element-wise sum
    pub fn add(&self, other: &Vector) -> Result<Self> {
        self.check_same_len("add", other)?;
        Ok(Self {
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Bilinear product `Σ aᵢ·bᵢ` (no conjugation)
    pub fn dot(&self, other: &Vector) -> Result<Complex64> {
        self.check_same_len("dot", other)?;
        Ok(dot_slices(&self.values, &other.values))
    }

    /// Inner product `⟨self|other⟩ = Σ conj(aᵢ)·bᵢ`
    pub fn inner_product(&self, other: &Vector) -> Result<Complex64> {
        self.check_same_len("inner product", other)?;
        Ok(self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Row-vector times matrix, `selfᵀ·M`
    pub fn multiply_matrix(&self, matrix: &Matrix) -> Result<Vector> {
        if self.len() != matrix.rows() {
            return Err(QuantumError::dimension_mismatch(
                "vector-matrix product",
                self.len(),
                format!("{}x{}", matrix.rows(), matrix.columns()),
            ));
        }
        let values = (0..matrix.columns())
            .map(|col| {
                self.values
                    .iter()
                    .enumerate()
                    .map(|(row, v)| v * matrix[(row, col)])
                    .sum()
            })
            .collect();
        Ok(Self { values })
    }

    /// Check two vectors are element-wise equal within `tolerance`
    pub fn is_approximately_equal(&self, other: &Vector, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// 2×2 unitary that rotates `(a, b)` onto `(|(a, b)|, 0)`
    ///
    /// Returns the identity when there is nothing to eliminate, i.e. when
    /// `b` vanishes and `a` is already real and non-negative.
    ///
    /// # Errors
    /// Fails if the vector does not have exactly two elements
    pub fn elimination_matrix(&self) -> Result<Matrix> {
        if self.len() != 2 {
            return Err(QuantumError::dimension_mismatch(
                "elimination matrix",
                self.len(),
                2,
            ));
        }
        let a = self.values[0];
        let b = self.values[1];
        let norm = (a.norm_sqr() + b.norm_sqr()).sqrt();
        if norm == 0.0 {
            return Matrix::identity(2);
        }
        Matrix::new(vec![
            vec![a.conj() / norm, b.conj() / norm],
            vec![-b / norm, a / norm],
        ])
    }

    fn check_same_len(&self, operation: &'static str, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(QuantumError::dimension_mismatch(
                operation,
                self.len(),
                other.len(),
            ));
        }
        Ok(())
    }
}

/// `Σ aᵢ·bᵢ` over two equally long slices
#[inline]
pub(crate) fn dot_slices(a: &[Complex64], b: &[Complex64]) -> Complex64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Index<usize> for Vector {
    type Output = Complex64;

    #[inline]
    fn index(&self, index: usize) -> &Complex64 {
        &self.values[index]
    }
}

impl TryFrom<Vec<Complex64>> for Vector {
    type Error = QuantumError;

    fn try_from(values: Vec<Complex64>) -> Result<Self> {
        Self::new(values)
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_empty_vector_rejected() {
        assert_eq!(Vector::new(vec![]), Err(QuantumError::Empty("Vector")));
    }

    #[test]
    fn test_norm() {
        let v = Vector::new(vec![c(0.6, 0.0), c(0.0, 0.8)]).unwrap();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inner_product_conjugates_left() {
        let a = Vector::new(vec![c(0.0, 1.0), c(1.0, 0.0)]).unwrap();
        let b = Vector::new(vec![c(0.0, 1.0), c(0.0, 0.0)]).unwrap();
        let product = a.inner_product(&b).unwrap();
        assert_relative_eq!(product.re, 1.0);
        assert_relative_eq!(product.im, 0.0);

        let dot = a.dot(&b).unwrap();
        assert_relative_eq!(dot.re, -1.0);
    }

    #[test]
    fn test_dot_length_mismatch() {
        let a = Vector::new(vec![c(1.0, 0.0)]).unwrap();
        let b = Vector::new(vec![c(1.0, 0.0), c(0.0, 0.0)]).unwrap();
        assert!(matches!(
            a.dot(&b),
            Err(QuantumError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_elimination_matrix_zeroes_second_element() {
        let v = Vector::new(vec![c(0.3, -0.4), c(0.5, 0.2)]).unwrap();
        let elimination = v.elimination_matrix().unwrap();
        assert!(elimination.is_approximately_unitary(1e-12));

        let rotated = elimination.multiply_vector(&v).unwrap();
        assert_relative_eq!(rotated[0].re, v.norm(), epsilon = 1e-12);
        assert_relative_eq!(rotated[0].im, 0.0, epsilon = 1e-12);
        assert!(rotated[1].norm() < 1e-12);
    }

    #[test]
    fn test_elimination_matrix_identity_when_nothing_to_do() {
        let v = Vector::new(vec![c(1.0, 0.0), c(0.0, 0.0)]).unwrap();
        let elimination = v.elimination_matrix().unwrap();
        assert!(elimination.is_approximately_equal(&Matrix::identity(2).unwrap(), 1e-12));
    }

    #[test]
    fn test_multiply_matrix() {
        let v = Vector::new(vec![c(1.0, 0.0), c(2.0, 0.0)]).unwrap();
        let m = Matrix::new(vec![
            vec![c(1.0, 0.0), c(0.0, 1.0)],
            vec![c(3.0, 0.0), c(0.0, 0.0)],
        ])
        .unwrap();
        let product = v.multiply_matrix(&m).unwrap();
        assert_eq!(product.values(), &[c(7.0, 0.0), c(0.0, 1.0)]);
    }
}
