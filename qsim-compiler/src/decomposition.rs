//! Gate decomposition
//!
//! - [`gray_code`]: basis orderings in which neighbours differ in one bit
//! - [`single_qubit`]: 2×2 unitaries as rotations and a phase correction
//! - [`two_level`]: multi-qubit unitaries as controlled single-qubit gates
//!
//! # References
//!
//! - Nielsen & Chuang, Ch. 4.5: "Universal quantum gates"
//! - Barenco et al., "Elementary gates for quantum computation" (1995)

pub mod gray_code;
pub mod single_qubit;
pub mod two_level;

pub use gray_code::{changed_bit, gray_code, gray_code_sequence};
pub use single_qubit::{EulerAngles, SingleQubitDecomposer, SingleQubitDecomposition};
pub use two_level::TwoLevelDecompositionSolver;
