//! Gate matrices as seen by the simulator
//!
//! A gate's effect on its own inputs is either a plain matrix or an oracle: a
//! block-diagonal matrix whose blocks are selected by the control bits. Oracle
//! matrices are never expanded eagerly; elements are computed on demand.

use crate::truth_table::TruthTable;
use qsim_core::{Complex64, Matrix, Result};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Oracle over an inner controlled matrix
///
/// The local index splits into the control section (most significant bits)
/// and the controlled part. Off the block diagonal every element is zero;
/// inactive sections behave as the identity and active sections apply the
/// controlled matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleMatrix {
    truth_table: TruthTable,
    controlled: Matrix,
    controlled_qubits: usize,
}

impl OracleMatrix {
    /// Compose a truth table with the matrix it activates
    ///
    /// # Errors
    /// Fails if `controlled` is not square with a power-of-two size
    pub fn new(truth_table: TruthTable, controlled: Matrix) -> Result<Self> {
        let controlled_qubits = controlled.qubit_count()?;
        Ok(Self {
            truth_table,
            controlled,
            controlled_qubits,
        })
    }

    /// Activation patterns
    #[inline]
    pub fn truth_table(&self) -> &TruthTable {
        &self.truth_table
    }

    /// Matrix applied on active sections
    #[inline]
    pub fn controlled(&self) -> &Matrix {
        &self.controlled
    }

    /// Number of control bits
    #[inline]
    pub fn control_count(&self) -> usize {
        self.truth_table.control_count()
    }

    /// Rows (and columns) of the full oracle matrix
    #[inline]
    pub fn count(&self) -> usize {
        1 << (self.control_count() + self.controlled_qubits)
    }

    /// Element of the full oracle matrix
    #[inline]
    pub fn element(&self, row: usize, column: usize) -> Complex64 {
        let section = row >> self.controlled_qubits;
        if section != column >> self.controlled_qubits {
            return ZERO;
        }

        let mask = (1 << self.controlled_qubits) - 1;
        let (row, column) = (row & mask, column & mask);
        if self.truth_table.is_active(section) {
            self.controlled[(row, column)]
        } else if row == column {
            ONE
        } else {
            ZERO
        }
    }

    /// Same oracle nested under `outer` controls, whose entries come first
    pub(crate) fn wrapped_by(self, outer: &TruthTable) -> Result<Self> {
        Ok(Self {
            truth_table: outer.concatenated(&self.truth_table)?,
            controlled: self.controlled,
            controlled_qubits: self.controlled_qubits,
        })
    }
}

/// Matrix of a gate on its own inputs
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorMatrix {
    /// Plain square matrix
    Raw(Matrix),
    /// Block-diagonal oracle
    Oracle(OracleMatrix),
}

impl SimulatorMatrix {
    /// Rows (and columns)
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            Self::Raw(matrix) => matrix.rows(),
            Self::Oracle(oracle) => oracle.count(),
        }
    }

    /// Element at (`row`, `column`)
    #[inline]
    pub fn element(&self, row: usize, column: usize) -> Complex64 {
        match self {
            Self::Raw(matrix) => matrix[(row, column)],
            Self::Oracle(oracle) => oracle.element(row, column),
        }
    }

    /// Truth table, for oracle matrices
    pub fn truth_table(&self) -> Option<&TruthTable> {
        match self {
            Self::Raw(_) => None,
            Self::Oracle(oracle) => Some(oracle.truth_table()),
        }
    }

    /// Matrix that must be unitary for the whole gate to be unitary
    pub fn base(&self) -> &Matrix {
        match self {
            Self::Raw(matrix) => matrix,
            Self::Oracle(oracle) => oracle.controlled(),
        }
    }

    /// Whether the gate matrix is unitary within `tolerance`
    pub fn is_approximately_unitary(&self, tolerance: f64) -> bool {
        self.base().is_approximately_unitary(tolerance)
    }

    /// Materialize the full matrix
    pub fn expanded_raw_matrix(&self) -> Result<Matrix> {
        match self {
            Self::Raw(matrix) => Ok(matrix.clone()),
            Self::Oracle(oracle) => {
                let count = oracle.count();
                Matrix::from_fn(count, count, |row, column| oracle.element(row, column))
            }
        }
    }
}
