//! Standard gate matrices
//!
//! Fixed single-qubit matrices are compile-time constants; parameterized and
//! multi-qubit matrices are built by the factory functions below. Inputs are
//! ordered most significant first, so the control of [`CNOT`] is the first
//! input.

use crate::simulator_matrix::{OracleMatrix, SimulatorMatrix};
use crate::truth_table::TruthTable;
use qsim_core::{Complex64, Matrix, QuantumError, Result};
use std::f64::consts::PI;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = 0.7071067811865476; // 1/√2

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// NOT (Pauli-X) gate matrix
/// X = [[0, 1],
///      [1, 0]]
pub const NOT: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Identity gate matrix
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// CNOT with the control as most significant input
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

/// Rotation axis of [`rotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Hadamard as a [`Matrix`]
pub fn hadamard() -> Matrix {
    Matrix::from(HADAMARD)
}

/// NOT as a [`Matrix`]
pub fn not() -> Matrix {
    Matrix::from(NOT)
}

/// CNOT as a [`Matrix`]
pub fn cnot() -> Matrix {
    Matrix::from(CNOT)
}

/// Phase shift: [[1, 0], [0, e^(iθ)]]
pub fn phase_shift(radians: f64) -> Matrix {
    Matrix::from([[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, radians)]])
}

/// Rotation around `axis` by `radians`
///
/// - Rx(θ) = [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]]
/// - Ry(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
/// - Rz(θ) = [[e^(-iθ/2), 0], [0, e^(iθ/2)]]
pub fn rotation(axis: Axis, radians: f64) -> Matrix {
    let half = radians / 2.0;
    let (sin, cos) = half.sin_cos();
    let matrix = match axis {
        Axis::X => [
            [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
            [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)],
        ],
        Axis::Y => [
            [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
            [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
        ],
        Axis::Z => [
            [Complex64::from_polar(1.0, -half), ZERO],
            [ZERO, Complex64::from_polar(1.0, half)],
        ],
    };
    Matrix::from(matrix)
}

/// Quantum Fourier transform of dimension `count`
///
/// Element (r, c) is `exp(±2πi·r·c/count) / √count`, with the negative sign
/// for the inverse transform.
///
/// # Example
/// ```
/// use qsim_gates::matrices;
///
/// let qft = matrices::quantum_fourier_transform(4, false).unwrap();
/// assert!((qft[(1, 1)].im - 0.5).abs() < 1e-12);
/// ```
pub fn quantum_fourier_transform(count: usize, inverse: bool) -> Result<Matrix> {
    if count == 0 {
        return Err(QuantumError::Empty("Quantum Fourier transform"));
    }
    let sign = if inverse { -1.0 } else { 1.0 };
    let scale = 1.0 / (count as f64).sqrt();
    Matrix::from_fn(count, count, |row, column| {
        // reduce the exponent first to keep the angle small
        let exponent = (row * column) % count;
        let angle = sign * 2.0 * PI * exponent as f64 / count as f64;
        Complex64::from_polar(scale, angle)
    })
}

/// Inversion about the mean (Grover diffusion) of dimension `count`
///
/// Element (r, c) is `2/count - δ(r, c)`.
pub fn inversion_about_mean(count: usize) -> Result<Matrix> {
    let mean = 2.0 / count as f64;
    Matrix::from_fn(count, count, |row, column| {
        let value = if row == column { mean - 1.0 } else { mean };
        Complex64::new(value, 0.0)
    })
}

/// `matrix` controlled by `control_count` extra most significant inputs
pub fn controlled_matrix(matrix: &Matrix, control_count: usize) -> Result<Matrix> {
    let oracle = OracleMatrix::new(TruthTable::all_ones(control_count)?, matrix.clone())?;
    SimulatorMatrix::Oracle(oracle).expanded_raw_matrix()
}

/// Oracle flipping a target qubit for every pattern in `truth_table`
///
/// The result acts on `control_count` controls followed by the target.
///
/// # Example
/// ```
/// use qsim_gates::matrices;
///
/// let oracle = matrices::oracle(&["1"], 1).unwrap();
/// assert!(oracle.is_approximately_equal(&matrices::cnot(), 1e-12));
/// ```
pub fn oracle<S: AsRef<str>>(truth_table: &[S], control_count: usize) -> Result<Matrix> {
    let oracle = OracleMatrix::new(TruthTable::new(truth_table, control_count)?, not())?;
    SimulatorMatrix::Oracle(oracle).expanded_raw_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_matrices_are_unitary() {
        for matrix in [hadamard(), not(), cnot(), Matrix::from(PAULI_Y), Matrix::from(PAULI_Z)] {
            assert!(matrix.is_approximately_unitary(1e-12));
        }
    }

    #[test]
    fn test_rotation_z_matches_phase_shift_up_to_global_phase() {
        let theta = 0.83;
        let rz = rotation(Axis::Z, theta);
        let phase = phase_shift(theta).scaled(Complex64::from_polar(1.0, -theta / 2.0));
        assert!(rz.is_approximately_equal(&phase, 1e-12));
    }

    #[test]
    fn test_rotation_x_by_pi_is_not_up_to_phase() {
        let rx = rotation(Axis::X, PI);
        assert!(rx.is_approximately_equal(&not().scaled(NEG_I), 1e-12));
    }

    #[test]
    fn test_quantum_fourier_transform_entries() {
        let qft = quantum_fourier_transform(4, false).unwrap();
        assert!(qft.is_approximately_unitary(1e-12));
        for row in 0..4 {
            for column in 0..4 {
                let angle = 2.0 * PI * (row * column) as f64 / 4.0;
                let expected = Complex64::from_polar(0.5, angle);
                assert_relative_eq!(qft[(row, column)].re, expected.re, epsilon = 1e-12);
                assert_relative_eq!(qft[(row, column)].im, expected.im, epsilon = 1e-12);
            }
        }

        let inverse = quantum_fourier_transform(4, true).unwrap();
        assert!(inverse
            .multiply(&qft)
            .unwrap()
            .is_approximately_identity(1e-12));
    }

    #[test]
    fn test_inversion_about_mean() {
        let diffusion = inversion_about_mean(4).unwrap();
        assert!(diffusion.is_approximately_unitary(1e-12));
        assert_relative_eq!(diffusion[(0, 0)].re, -0.5);
        assert_relative_eq!(diffusion[(0, 1)].re, 0.5);
    }

    #[test]
    fn test_oracle_matches_cnot() {
        let oracle = oracle(&["01"], 1).unwrap();
        let cnot = cnot();
        for row in 0..4 {
            for column in 0..4 {
                assert_eq!(oracle[(row, column)], cnot[(row, column)]);
            }
        }
    }

    #[test]
    fn test_controlled_matrix_is_toffoli() {
        let toffoli = controlled_matrix(&not(), 2).unwrap();
        assert_eq!(toffoli.rows(), 8);
        assert_eq!(toffoli[(6, 7)], ONE);
        assert_eq!(toffoli[(7, 6)], ONE);
        assert_eq!(toffoli[(5, 5)], ONE);
        assert_eq!(toffoli[(6, 6)], ZERO);
    }
}
