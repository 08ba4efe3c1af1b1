//! Single-qubit gate decomposition
//!
//! Any 2×2 unitary can be written with ZYZ Euler angles as
//!
//! ```text
//! U = e^(iα) Rz(β) Ry(γ) Rz(δ)
//! ```
//!
//! Writing `V = e^(-iα) U` for the special unitary part, the cosine-sine
//! form of `V` gives `cos(γ/2) = |V00|`, `sin(γ/2) = |V10|`,
//! `arg(V00) = -(β + δ)/2` and `arg(V10) = (β - δ)/2`. The global phase
//! `e^(iα)` is kept as `PhaseShift(2α)·Rz(-2α)` so the decomposition stays
//! exact once it is placed under a control.

use qsim_core::{Complex64, Matrix, QuantumError, Result, TOLERANCE};
use qsim_gates::{Axis, Gate};
use serde::{Deserialize, Serialize};

/// How a 2×2 unitary is turned into gates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingleQubitDecomposition {
    /// Keep the unitary as a single matrix gate
    None,
    /// Rz-Ry-Rz rotations plus a phase correction
    #[default]
    CosineSine,
}

/// ZYZ Euler angles of a 2×2 unitary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    /// Global phase
    pub alpha: f64,
    /// Final Z rotation
    pub beta: f64,
    /// Y rotation
    pub gamma: f64,
    /// First Z rotation
    pub delta: f64,
}

impl EulerAngles {
    /// Angles of `matrix`
    ///
    /// # Errors
    /// - [`QuantumError::DimensionMismatch`] if `matrix` is not 2×2
    /// - [`QuantumError::NotUnitary`] if it is not unitary within `tolerance`
    pub fn from_unitary(matrix: &Matrix, tolerance: f64) -> Result<Self> {
        check_single_qubit(matrix)?;
        if !matrix.is_approximately_unitary(tolerance) {
            return Err(QuantumError::NotUnitary { tolerance });
        }

        let determinant = matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)];
        let alpha = determinant.arg() / 2.0;

        let phase = Complex64::from_polar(1.0, -alpha);
        let a = matrix[(0, 0)] * phase;
        let b = matrix[(1, 0)] * phase;

        Ok(Self {
            alpha,
            beta: b.arg() - a.arg(),
            gamma: 2.0 * b.norm().atan2(a.norm()),
            delta: -a.arg() - b.arg(),
        })
    }

    /// `e^(iα) Rz(β) Ry(γ) Rz(δ)`
    pub fn matrix(&self) -> Result<Matrix> {
        let rotations = qsim_gates::matrices::rotation(Axis::Z, self.beta)
            .multiply(&qsim_gates::matrices::rotation(Axis::Y, self.gamma))?
            .multiply(&qsim_gates::matrices::rotation(Axis::Z, self.delta))?;
        Ok(rotations.scaled(Complex64::from_polar(1.0, self.alpha)))
    }
}

/// Turns 2×2 unitaries into single-qubit gates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleQubitDecomposer {
    strategy: SingleQubitDecomposition,
    tolerance: f64,
}

impl Default for SingleQubitDecomposer {
    fn default() -> Self {
        Self::new(SingleQubitDecomposition::default(), TOLERANCE)
    }
}

impl SingleQubitDecomposer {
    /// Decomposer using `strategy`; angles below `tolerance` are dropped
    pub fn new(strategy: SingleQubitDecomposition, tolerance: f64) -> Self {
        Self {
            strategy,
            tolerance,
        }
    }

    #[inline]
    pub fn strategy(&self) -> SingleQubitDecomposition {
        self.strategy
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Gates on `target` whose product is `matrix`, in application order
    ///
    /// Returns no gates when `matrix` is the identity within tolerance.
    pub fn decompose(&self, matrix: &Matrix, target: usize) -> Result<Vec<Gate>> {
        check_single_qubit(matrix)?;
        if matrix.is_approximately_identity(self.tolerance) {
            return Ok(Vec::new());
        }

        match self.strategy {
            SingleQubitDecomposition::None => Ok(vec![Gate::matrix(matrix.clone(), vec![target])]),
            SingleQubitDecomposition::CosineSine => {
                let angles = EulerAngles::from_unitary(matrix, self.tolerance)?;
                let mut gates = Vec::with_capacity(5);
                self.push_rotation(&mut gates, Axis::Z, angles.delta, target);
                self.push_rotation(&mut gates, Axis::Y, angles.gamma, target);
                self.push_rotation(&mut gates, Axis::Z, angles.beta, target);
                if angles.alpha.abs() > self.tolerance {
                    gates.push(Gate::phase_shift(2.0 * angles.alpha, target));
                    gates.push(Gate::rotation(Axis::Z, -2.0 * angles.alpha, target));
                }
                Ok(gates)
            }
        }
    }

    fn push_rotation(&self, gates: &mut Vec<Gate>, axis: Axis, radians: f64, target: usize) {
        if radians.abs() > self.tolerance {
            gates.push(Gate::rotation(axis, radians, target));
        }
    }
}

fn check_single_qubit(matrix: &Matrix) -> Result<()> {
    if matrix.rows() != 2 || matrix.columns() != 2 {
        return Err(QuantumError::dimension_mismatch(
            "single-qubit decomposition",
            format!("{}x{}", matrix.rows(), matrix.columns()),
            "2x2",
        ));
    }
    Ok(())
}
