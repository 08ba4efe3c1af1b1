//! Strategies applying a [`CircuitSimulatorMatrix`] to a state
//!
//! Every strategy computes the same product (`M·v` for statevectors, `M·U`
//! for unitaries) and differs only in how much of `M` it materializes and how
//! the work is spread across threads:
//!
//! | Strategy | Materializes | Parallel over |
//! |---|---|---|
//! | [`DirectTransformation`] | nothing | output indices |
//! | [`RowByRowTransformation`] | one row at a time | rows, and columns within a row |
//! | [`ElementByElementTransformation`] | nothing, recomputing elements | output elements |
//! | [`FullMatrixTransformation`] | the whole matrix | rows of the expansion |
//!
//! Density matrices reuse the unitary strategies: `ρ' = M·(M·ρ)†`, which is
//! `M·ρ·M†` for Hermitian `ρ`.

mod direct;
mod element_by_element;
mod full_matrix;
mod row_by_row;

pub use direct::DirectTransformation;
pub use element_by_element::ElementByElementTransformation;
pub use full_matrix::FullMatrixTransformation;
pub use row_by_row::RowByRowTransformation;

use crate::circuit_matrix::CircuitSimulatorMatrix;
use crate::config::TransformationMode;
use crate::error::{Result, SimulatorError};
use qsim_core::{Matrix, Vector};
use std::sync::Arc;

/// Applies a gate to a statevector
pub trait StatevectorTransformation: Send + Sync {
    /// `matrix · vector`
    fn transform_statevector(
        &self,
        matrix: &CircuitSimulatorMatrix,
        vector: &Vector,
    ) -> Result<Vector>;
}

/// Applies a gate to the unitary of the circuit so far
pub trait UnitaryTransformation: Send + Sync {
    /// `matrix · unitary`
    fn transform_unitary(&self, matrix: &CircuitSimulatorMatrix, unitary: &Matrix)
        -> Result<Matrix>;
}

/// Applies an operator to a density matrix
pub trait DensityMatrixTransformation: Send + Sync {
    /// `matrix · rho · matrix†`, with `rho` Hermitian
    fn transform_density_matrix(
        &self,
        matrix: &CircuitSimulatorMatrix,
        rho: &Matrix,
    ) -> Result<Matrix>;

    /// `Σ K · rho · K†` over the Kraus operators `operators`
    fn transform_density_matrix_kraus(
        &self,
        operators: &[CircuitSimulatorMatrix],
        rho: &Matrix,
    ) -> Result<Matrix> {
        let mut terms = operators
            .iter()
            .map(|operator| self.transform_density_matrix(operator, rho));
        let first = terms.next().ok_or_else(|| {
            SimulatorError::InvalidConfig("no Kraus operators to apply".to_string())
        })??;
        terms.try_fold(first, |sum, term| -> Result<Matrix> { Ok(sum.add(&term?)?) })
    }
}

impl<T: UnitaryTransformation + ?Sized> DensityMatrixTransformation for T {
    fn transform_density_matrix(
        &self,
        matrix: &CircuitSimulatorMatrix,
        rho: &Matrix,
    ) -> Result<Matrix> {
        let left = self.transform_unitary(matrix, rho)?;
        self.transform_unitary(matrix, &left.conjugate_transposed())
    }
}

fn check_dimension(matrix: &CircuitSimulatorMatrix, actual: usize) -> Result<()> {
    if matrix.count() != actual {
        return Err(qsim_core::QuantumError::dimension_mismatch(
            "transformation",
            format!("{}x{}", matrix.count(), matrix.count()),
            actual.to_string(),
        )
        .into());
    }
    Ok(())
}

impl TransformationMode {
    /// Statevector strategy for this mode
    pub fn statevector_transformation(&self) -> Result<Arc<dyn StatevectorTransformation>> {
        Ok(match *self {
            TransformationMode::Direct {
                calculation_concurrency,
            } => Arc::new(DirectTransformation::new(calculation_concurrency)?),
            TransformationMode::RowByRow {
                calculation_concurrency,
                expansion_concurrency,
            } => Arc::new(RowByRowTransformation::new(
                calculation_concurrency,
                expansion_concurrency,
            )?),
            TransformationMode::ElementByElement {
                calculation_concurrency,
            } => Arc::new(ElementByElementTransformation::new(calculation_concurrency)?),
            TransformationMode::FullMatrix {
                expansion_concurrency,
            } => Arc::new(FullMatrixTransformation::new(expansion_concurrency)?),
        })
    }

    /// Unitary strategy for this mode
    pub fn unitary_transformation(&self) -> Result<Arc<dyn UnitaryTransformation>> {
        Ok(match *self {
            TransformationMode::Direct {
                calculation_concurrency,
            } => Arc::new(DirectTransformation::new(calculation_concurrency)?),
            TransformationMode::RowByRow {
                calculation_concurrency,
                expansion_concurrency,
            } => Arc::new(RowByRowTransformation::new(
                calculation_concurrency,
                expansion_concurrency,
            )?),
            TransformationMode::ElementByElement {
                calculation_concurrency,
            } => Arc::new(ElementByElementTransformation::new(calculation_concurrency)?),
            TransformationMode::FullMatrix {
                expansion_concurrency,
            } => Arc::new(FullMatrixTransformation::new(expansion_concurrency)?),
        })
    }
}
