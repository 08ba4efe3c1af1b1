//! Immutable registers advanced one gate at a time
//!
//! `applying` never mutates a register; it returns the register holding the
//! next state, validated the same way the initial state was.

use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::error::Result;
use crate::transformation::{
    DensityMatrixTransformation, StatevectorTransformation, UnitaryTransformation,
};
use qsim_core::Matrix;
use qsim_state::{DensityMatrix, Statevector};
use std::sync::Arc;

/// Statevector plus the strategy that advances it
#[derive(Clone)]
pub struct StatevectorRegister {
    state: Statevector,
    transformation: Arc<dyn StatevectorTransformation>,
    tolerance: f64,
}

impl StatevectorRegister {
    pub fn new(
        state: Statevector,
        transformation: Arc<dyn StatevectorTransformation>,
        tolerance: f64,
    ) -> Self {
        Self {
            state,
            transformation,
            tolerance,
        }
    }

    #[inline]
    pub fn state(&self) -> &Statevector {
        &self.state
    }

    pub fn into_state(self) -> Statevector {
        self.state
    }

    /// Register holding `matrix · state`
    ///
    /// # Errors
    /// [`SimulatorError::State`](crate::SimulatorError::State) if the result
    /// is no longer normalized
    pub fn applying(&self, matrix: &CircuitSimulatorMatrix) -> Result<Self> {
        let vector = self
            .transformation
            .transform_statevector(matrix, self.state.vector())?;
        Ok(Self {
            state: Statevector::new(vector, self.tolerance)?,
            transformation: Arc::clone(&self.transformation),
            tolerance: self.tolerance,
        })
    }
}

/// Unitary of the gates applied so far
#[derive(Clone)]
pub struct UnitaryRegister {
    matrix: Matrix,
    transformation: Arc<dyn UnitaryTransformation>,
}

impl UnitaryRegister {
    pub fn new(matrix: Matrix, transformation: Arc<dyn UnitaryTransformation>) -> Self {
        Self {
            matrix,
            transformation,
        }
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// Register holding `matrix · unitary`
    pub fn applying(&self, matrix: &CircuitSimulatorMatrix) -> Result<Self> {
        Ok(Self {
            matrix: self.transformation.transform_unitary(matrix, &self.matrix)?,
            transformation: Arc::clone(&self.transformation),
        })
    }
}

/// Density matrix plus the strategy that advances it
#[derive(Clone)]
pub struct DensityMatrixRegister {
    state: DensityMatrix,
    transformation: Arc<dyn UnitaryTransformation>,
    tolerance: f64,
}

impl DensityMatrixRegister {
    pub fn new(
        state: DensityMatrix,
        transformation: Arc<dyn UnitaryTransformation>,
        tolerance: f64,
    ) -> Self {
        Self {
            state,
            transformation,
            tolerance,
        }
    }

    #[inline]
    pub fn state(&self) -> &DensityMatrix {
        &self.state
    }

    pub fn into_state(self) -> DensityMatrix {
        self.state
    }

    /// Register holding `Σ K · ρ · K†` over `operators`
    ///
    /// A unitary gate is the single operator `U`.
    pub fn applying(&self, operators: &[CircuitSimulatorMatrix]) -> Result<Self> {
        let rho = self
            .transformation
            .transform_density_matrix_kraus(operators, self.state.matrix())?;
        Ok(Self {
            state: DensityMatrix::new(rho, self.tolerance)?,
            transformation: Arc::clone(&self.transformation),
            tolerance: self.tolerance,
        })
    }
}
