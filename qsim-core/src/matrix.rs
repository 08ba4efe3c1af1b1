//! Immutable dense complex matrix
//!
//! Matrices are stored in row-major order, the same layout gate matrices use
//! throughout qsim. All operations return new instances; a `Matrix` is never
//! mutated once built and never has zero rows or columns.

use crate::vector::dot_slices;
use crate::{QuantumError, Result, Vector};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Dense complex matrix
///
/// # Example
/// ```
/// use qsim_core::{Complex64, Matrix};
///
/// let x = Matrix::new(vec![
///     vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
///     vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
/// ]).unwrap();
/// assert!(x.is_approximately_unitary(1e-10));
/// assert!(x.multiply(&x).unwrap().is_approximately_equal(&Matrix::identity(2).unwrap(), 1e-10));
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    values: Vec<Complex64>,
}

impl Matrix {
    /// Build a matrix from a list of rows
    ///
    /// # Errors
    /// Fails if there are no rows, no columns, or rows differ in length
    pub fn new(rows: Vec<Vec<Complex64>>) -> Result<Self> {
        let row_count = rows.len();
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || columns == 0 {
            return Err(QuantumError::Empty("Matrix"));
        }

        let mut values = Vec::with_capacity(row_count * columns);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(QuantumError::RaggedMatrix {
                    row: index,
                    expected: columns,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self {
            rows: row_count,
            columns,
            values,
        })
    }

    /// Build a matrix from row-major values
    pub fn from_values(rows: usize, columns: usize, values: Vec<Complex64>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(QuantumError::Empty("Matrix"));
        }
        if values.len() != rows * columns {
            return Err(QuantumError::dimension_mismatch(
                "matrix from values",
                format!("{}x{}", rows, columns),
                values.len(),
            ));
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Build a matrix evaluating `element(row, column)` for every position
    pub fn from_fn<F>(rows: usize, columns: usize, mut element: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Complex64,
    {
        if rows == 0 || columns == 0 {
            return Err(QuantumError::Empty("Matrix"));
        }
        let mut values = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                values.push(element(row, column));
            }
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Build a square matrix from precomputed rows of equal length
    ///
    /// Used by callers that compute rows in parallel.
    pub fn from_row_vectors(rows: Vec<Vector>) -> Result<Self> {
        Self::new(rows.into_iter().map(Vector::into_values).collect())
    }

    /// `count`×`count` identity matrix
    pub fn identity(count: usize) -> Result<Self> {
        Self::from_fn(count, count, |row, column| if row == column { ONE } else { ZERO })
    }

    /// Permutation matrix sending basis state `j` to `permutation[j]`
    ///
    /// # Errors
    /// Fails with [`QuantumError::InvalidPermutation`] unless `permutation`
    /// contains every index in `0..permutation.len()` exactly once
    pub fn permutation(permutation: &[usize]) -> Result<Self> {
        let count = permutation.len();
        let mut seen = vec![false; count];
        for &target in permutation {
            if target >= count || seen[target] {
                return Err(QuantumError::InvalidPermutation(permutation.to_vec()));
            }
            seen[target] = true;
        }
        Self::from_fn(count, count, |row, column| {
            if permutation[column] == row {
                ONE
            } else {
                ZERO
            }
        })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether rows equal columns
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Element at (`row`, `column`), if inside the matrix
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<Complex64> {
        if row < self.rows && column < self.columns {
            Some(self.values[row * self.columns + column])
        } else {
            None
        }
    }

    /// Row-major elements
    #[inline]
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Borrow one row as a slice
    pub fn row_slice(&self, row: usize) -> Result<&[Complex64]> {
        if row >= self.rows {
            return Err(QuantumError::OutOfRange(format!(
                "row {} of {}x{} matrix",
                row, self.rows, self.columns
            )));
        }
        let start = row * self.columns;
        Ok(&self.values[start..start + self.columns])
    }

    /// Copy one row into a [`Vector`]
    pub fn row(&self, row: usize) -> Result<Vector> {
        Vector::new(self.row_slice(row)?.to_vec())
    }

    /// Copy one column into a [`Vector`]
    pub fn column(&self, column: usize) -> Result<Vector> {
        if column >= self.columns {
            return Err(QuantumError::OutOfRange(format!(
                "column {} of {}x{} matrix",
                column, self.rows, self.columns
            )));
        }
        Vector::new((0..self.rows).map(|row| self[(row, column)]).collect())
    }

    /// Transpose
    pub fn transposed(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for column in 0..self.columns {
            for row in 0..self.rows {
                values.push(self[(row, column)]);
            }
        }
        Self {
            rows: self.columns,
            columns: self.rows,
            values,
        }
    }

    /// Element-wise complex conjugate
    pub fn conjugated(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            values: self.values.iter().map(|v| v.conj()).collect(),
        }
    }

    /// Conjugate transpose (adjoint, M†)
    pub fn conjugate_transposed(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for column in 0..self.columns {
            for row in 0..self.rows {
                values.push(self[(row, column)].conj());
            }
        }
        Self {
            rows: self.columns,
            columns: self.rows,
            values,
        }
    }

    /// Multiply every element by `factor`
    pub fn scaled(&self, factor: Complex64) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Element-wise sum
    pub fn add(&self, other: &Matrix) -> Result<Self> {
        self.check_same_shape("add", other)?;
        Ok(Self {
            rows: self.rows,
            columns: self.columns,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Element-wise difference
    pub fn subtract(&self, other: &Matrix) -> Result<Self> {
        self.check_same_shape("subtract", other)?;
        Ok(Self {
            rows: self.rows,
            columns: self.columns,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Matrix product `self · other`
    pub fn multiply(&self, other: &Matrix) -> Result<Self> {
        if self.columns != other.rows {
            return Err(QuantumError::dimension_mismatch(
                "matrix product",
                self.shape(),
                other.shape(),
            ));
        }

        let mut values = vec![ZERO; self.rows * other.columns];
        for row in 0..self.rows {
            let left = &self.values[row * self.columns..(row + 1) * self.columns];
            let out = &mut values[row * other.columns..(row + 1) * other.columns];
            for (k, &factor) in left.iter().enumerate() {
                if factor == ZERO {
                    continue;
                }
                let right = &other.values[k * other.columns..(k + 1) * other.columns];
                for (slot, &value) in out.iter_mut().zip(right) {
                    *slot += factor * value;
                }
            }
        }

        Ok(Self {
            rows: self.rows,
            columns: other.columns,
            values,
        })
    }

    /// Matrix-vector product `self · vector`
    pub fn multiply_vector(&self, vector: &Vector) -> Result<Vector> {
        if self.columns != vector.len() {
            return Err(QuantumError::dimension_mismatch(
                "matrix-vector product",
                self.shape(),
                vector.len(),
            ));
        }
        let values = self
            .values
            .chunks(self.columns)
            .map(|row| dot_slices(row, vector.values()))
            .collect();
        Vector::new(values)
    }

    /// Kronecker product `self ⊗ other`
    pub fn tensor_product(&self, other: &Matrix) -> Self {
        let rows = self.rows * other.rows;
        let columns = self.columns * other.columns;
        let mut values = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                values.push(
                    self[(row / other.rows, column / other.columns)]
                        * other[(row % other.rows, column % other.columns)],
                );
            }
        }
        Self {
            rows,
            columns,
            values,
        }
    }

    /// Copy a `rows`×`columns` block starting at (`start_row`, `start_column`)
    pub fn slice(
        &self,
        start_row: usize,
        start_column: usize,
        rows: usize,
        columns: usize,
    ) -> Result<Self> {
        if start_row + rows > self.rows || start_column + columns > self.columns {
            return Err(QuantumError::OutOfRange(format!(
                "slice {}x{} at ({}, {}) of {} matrix",
                rows,
                columns,
                start_row,
                start_column,
                self.shape()
            )));
        }
        Self::from_fn(rows, columns, |row, column| {
            self[(start_row + row, start_column + column)]
        })
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> Complex64 {
        (0..self.rows.min(self.columns))
            .map(|i| self[(i, i)])
            .sum()
    }

    /// Element-wise comparison within an absolute `tolerance`
    pub fn is_approximately_equal(&self, other: &Matrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Whether `M·M† ≈ I` within `tolerance`
    pub fn is_approximately_unitary(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            let row_i = &self.values[i * self.columns..(i + 1) * self.columns];
            for j in i..self.rows {
                let row_j = &self.values[j * self.columns..(j + 1) * self.columns];
                let product: Complex64 = row_i.iter().zip(row_j).map(|(a, b)| a * b.conj()).sum();
                let expected = if i == j { ONE } else { ZERO };
                if (product - expected).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Whether `M ≈ M†` within `tolerance`
    pub fn is_approximately_hermitian(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for row in 0..self.rows {
            for column in row..self.columns {
                if (self[(row, column)] - self[(column, row)].conj()).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the matrix is the identity within `tolerance`
    pub fn is_approximately_identity(&self, tolerance: f64) -> bool {
        self.is_square()
            && self.values.iter().enumerate().all(|(index, value)| {
                let expected = if index / self.columns == index % self.columns {
                    ONE
                } else {
                    ZERO
                };
                (value - expected).norm() <= tolerance
            })
    }

    /// Log2 of the row count, if the matrix is square with a power-of-two size
    pub fn qubit_count(&self) -> Result<usize> {
        if !self.is_square() {
            return Err(QuantumError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !self.rows.is_power_of_two() {
            return Err(QuantumError::NotPowerOfTwo(self.rows));
        }
        Ok(self.rows.trailing_zeros() as usize)
    }

    fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.columns)
    }

    fn check_same_shape(&self, operation: &'static str, other: &Matrix) -> Result<()> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(QuantumError::dimension_mismatch(
                operation,
                self.shape(),
                other.shape(),
            ));
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Complex64;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &Complex64 {
        assert!(column < self.columns, "column {} out of range", column);
        &self.values[row * self.columns + column]
    }
}

impl<const N: usize> From<[[Complex64; N]; N]> for Matrix {
    /// Square matrix from a fixed-size literal; `N` must not be zero
    fn from(rows: [[Complex64; N]; N]) -> Self {
        assert!(N > 0, "matrix literal must not be empty");
        Self {
            rows: N,
            columns: N,
            values: rows.iter().flatten().copied().collect(),
        }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} [", self.rows, self.columns)?;
        for row in self.values.chunks(self.columns) {
            write!(f, "  ")?;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}{:+.4}i", value.re, value.im)?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const I: Complex64 = Complex64::new(0.0, 1.0);
    const INV_SQRT2: f64 = 0.7071067811865476;

    fn real(values: &[&[f64]]) -> Matrix {
        Matrix::new(
            values
                .iter()
                .map(|row| row.iter().map(|&v| Complex64::new(v, 0.0)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let result = Matrix::new(vec![vec![ONE, ZERO], vec![ONE]]);
        assert!(matches!(result, Err(QuantumError::RaggedMatrix { row: 1, .. })));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        assert!(Matrix::new(vec![]).is_err());
        assert!(Matrix::new(vec![vec![]]).is_err());
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn test_multiply_shapes() {
        let a = real(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = real(&[&[1.0], &[0.0], &[1.0]]);
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.rows(), 2);
        assert_eq!(product.columns(), 1);
        assert_eq!(product[(0, 0)], Complex64::new(4.0, 0.0));
        assert_eq!(product[(1, 0)], Complex64::new(10.0, 0.0));

        assert!(matches!(
            b.multiply(&b),
            Err(QuantumError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_conjugate_transposed() {
        let m = Matrix::new(vec![vec![ONE, I], vec![ZERO, -I]]).unwrap();
        let adjoint = m.conjugate_transposed();
        assert_eq!(adjoint[(1, 0)], -I);
        assert_eq!(adjoint[(0, 1)], ZERO);
        assert_eq!(adjoint[(1, 1)], I);
    }

    #[test]
    fn test_hadamard_is_unitary_and_hermitian() {
        let h = real(&[&[INV_SQRT2, INV_SQRT2], &[INV_SQRT2, -INV_SQRT2]]);
        assert!(h.is_approximately_unitary(1e-10));
        assert!(h.is_approximately_hermitian(1e-10));
        assert!(!real(&[&[1.0, 1.0], &[0.0, 1.0]]).is_approximately_unitary(1e-3));
    }

    #[test]
    fn test_permutation() {
        let p = Matrix::permutation(&[1, 2, 0]).unwrap();
        let v = Vector::new(vec![ONE, ZERO, ZERO]).unwrap();
        let moved = p.multiply_vector(&v).unwrap();
        assert_eq!(moved[1], ONE);
        assert!(p.is_approximately_unitary(1e-12));

        assert_eq!(
            Matrix::permutation(&[0, 0, 1]),
            Err(QuantumError::InvalidPermutation(vec![0, 0, 1]))
        );
        assert!(Matrix::permutation(&[0, 3]).is_err());
    }

    #[test]
    fn test_tensor_product_dimensions() {
        let x = real(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let id = Matrix::identity(2).unwrap();
        let product = x.tensor_product(&id);
        assert_eq!(product.rows(), 4);
        // X ⊗ I swaps the two halves of the basis
        assert_eq!(product[(0, 2)], ONE);
        assert_eq!(product[(3, 1)], ONE);
        assert_eq!(product[(0, 0)], ZERO);
    }

    #[test]
    fn test_slice() {
        let m = real(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        let block = m.slice(1, 1, 2, 2).unwrap();
        assert!(block.is_approximately_equal(&real(&[&[5.0, 6.0], &[8.0, 9.0]]), 0.0));
        assert!(m.slice(2, 2, 2, 1).is_err());
    }

    #[test]
    fn test_trace_and_qubit_count() {
        let id = Matrix::identity(8).unwrap();
        assert_relative_eq!(id.trace().re, 8.0);
        assert_eq!(id.qubit_count().unwrap(), 3);
        assert_eq!(
            Matrix::identity(3).unwrap().qubit_count(),
            Err(QuantumError::NotPowerOfTwo(3))
        );
    }

    #[test]
    fn test_row_and_column() {
        let m = real(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(m.row(1).unwrap().values(), m.row_slice(1).unwrap());
        assert_eq!(m.column(1).unwrap()[0], Complex64::new(2.0, 0.0));
        assert!(m.row(2).is_err());
        assert!(m.column(5).is_err());
    }
}
