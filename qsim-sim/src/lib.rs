//! Quantum circuit simulation engines
//!
//! Three simulations share one gate pipeline: a gate is extracted into its
//! local matrix, lifted to the register as a [`CircuitSimulatorMatrix`] and
//! applied by the [`TransformationMode`] chosen in [`SimulatorConfig`].
//!
//! - [`Circuit::statevector`] evolves a pure state
//! - [`Circuit::unitary`] composes the matrix of the whole circuit
//! - [`NoiseCircuit::density_matrix`] evolves a mixed state through gates
//!   and noise channels
//!
//! # Example
//!
//! ```
//! use qsim_gates::Gate;
//! use qsim_sim::{Circuit, SimulatorConfig, TransformationMode};
//!
//! let config = SimulatorConfig::new().with_mode(TransformationMode::RowByRow {
//!     calculation_concurrency: 2,
//!     expansion_concurrency: 2,
//! });
//! let circuit = Circuit::with_config(
//!     vec![Gate::hadamard(0), Gate::controlled_not(1, 0)],
//!     2,
//!     config,
//! )
//! .unwrap();
//!
//! let state = circuit.statevector().unwrap();
//! assert!((state.probabilities()[3] - 0.5).abs() < 1e-9);
//! ```

pub mod circuit;
pub mod circuit_matrix;
pub mod config;
pub mod error;
pub mod facade;
pub mod register;
pub mod transformation;

mod pool;

pub use circuit::{Circuit, NoiseCircuit};
pub use circuit_matrix::CircuitSimulatorMatrix;
pub use config::{SimulatorConfig, TransformationMode};
pub use error::{Result, SimulatorError};
pub use facade::{DensityMatrixSimulatorFacade, StatevectorSimulatorFacade, UnitarySimulatorFacade};
pub use register::{DensityMatrixRegister, StatevectorRegister, UnitaryRegister};
pub use transformation::{
    DensityMatrixTransformation, DirectTransformation, ElementByElementTransformation,
    FullMatrixTransformation, RowByRowTransformation, StatevectorTransformation,
    UnitaryTransformation,
};
