//! Simulator configuration

use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};

/// Strategy used to apply a gate to a state
///
/// Each variant carries the concurrency knobs it understands, so a strategy
/// that never expands rows cannot be given an expansion concurrency.
/// A concurrency of 1 runs on the caller's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformationMode {
    /// Compute every output index straight from the gate matrix
    Direct { calculation_concurrency: usize },
    /// Build one row of the circuit matrix at a time
    RowByRow {
        calculation_concurrency: usize,
        expansion_concurrency: usize,
    },
    /// Evaluate circuit matrix elements on demand inside each sum
    ElementByElement { calculation_concurrency: usize },
    /// Expand the circuit matrix, then multiply densely
    FullMatrix { expansion_concurrency: usize },
}

impl TransformationMode {
    /// Check every concurrency knob is at least 1
    pub fn validate(&self) -> Result<()> {
        match *self {
            TransformationMode::Direct {
                calculation_concurrency,
            }
            | TransformationMode::ElementByElement {
                calculation_concurrency,
            } => at_least_one("calculation_concurrency", calculation_concurrency),
            TransformationMode::RowByRow {
                calculation_concurrency,
                expansion_concurrency,
            } => {
                at_least_one("calculation_concurrency", calculation_concurrency)?;
                at_least_one("expansion_concurrency", expansion_concurrency)
            }
            TransformationMode::FullMatrix {
                expansion_concurrency,
            } => at_least_one("expansion_concurrency", expansion_concurrency),
        }
    }
}

fn at_least_one(knob: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        Err(SimulatorError::ZeroConcurrency { knob })
    } else {
        Ok(())
    }
}

impl Default for TransformationMode {
    fn default() -> Self {
        TransformationMode::Direct {
            calculation_concurrency: 1,
        }
    }
}

/// Configuration for the quantum simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Strategy for statevector simulation
    ///
    /// Default: Direct, sequential
    pub statevector_mode: TransformationMode,

    /// Strategy for unitary simulation
    ///
    /// Default: Direct, sequential
    pub unitary_mode: TransformationMode,

    /// Strategy for density matrix simulation
    ///
    /// Default: Direct, sequential
    pub density_matrix_mode: TransformationMode,

    /// Absolute tolerance for unitarity and normalization checks
    ///
    /// Default: [`qsim_core::TOLERANCE`]
    pub tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            statevector_mode: TransformationMode::default(),
            unitary_mode: TransformationMode::default(),
            density_matrix_mode: TransformationMode::default(),
            tolerance: qsim_core::TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Every strategy on the caller's thread
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Use every available core
    ///
    /// - Direct statevector and density matrix updates across all cores
    /// - Row-by-row unitary updates with rows spread across all cores
    pub fn parallel() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            statevector_mode: TransformationMode::Direct {
                calculation_concurrency: threads,
            },
            unitary_mode: TransformationMode::RowByRow {
                calculation_concurrency: threads,
                expansion_concurrency: 1,
            },
            density_matrix_mode: TransformationMode::Direct {
                calculation_concurrency: threads,
            },
            ..Default::default()
        }
    }

    /// Set the statevector strategy
    pub fn with_statevector_mode(mut self, mode: TransformationMode) -> Self {
        self.statevector_mode = mode;
        self
    }

    /// Set the unitary strategy
    pub fn with_unitary_mode(mut self, mode: TransformationMode) -> Self {
        self.unitary_mode = mode;
        self
    }

    /// Set the density matrix strategy
    pub fn with_density_matrix_mode(mut self, mode: TransformationMode) -> Self {
        self.density_matrix_mode = mode;
        self
    }

    /// Use the same strategy for every simulation
    pub fn with_mode(self, mode: TransformationMode) -> Self {
        self.with_statevector_mode(mode)
            .with_unitary_mode(mode)
            .with_density_matrix_mode(mode)
    }

    /// Set the tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.statevector_mode.validate()?;
        self.unitary_mode.validate()?;
        self.density_matrix_mode.validate()?;

        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SimulatorError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.tolerance, qsim_core::TOLERANCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(SimulatorConfig::sequential().validate().is_ok());
        assert!(SimulatorConfig::parallel().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = SimulatorConfig::new().with_unitary_mode(TransformationMode::RowByRow {
            calculation_concurrency: 2,
            expansion_concurrency: 0,
        });
        assert_eq!(
            config.validate(),
            Err(SimulatorError::ZeroConcurrency {
                knob: "expansion_concurrency"
            })
        );

        let mode = TransformationMode::FullMatrix {
            expansion_concurrency: 0,
        };
        assert!(mode.validate().is_err());
    }

    #[test]
    fn test_invalid_tolerance() {
        let config = SimulatorConfig::new().with_tolerance(0.0);
        assert!(matches!(
            config.validate(),
            Err(SimulatorError::InvalidConfig(_))
        ));
        assert!(SimulatorConfig::new().with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let mode = TransformationMode::ElementByElement {
            calculation_concurrency: 4,
        };
        let config = SimulatorConfig::new().with_mode(mode).with_tolerance(1e-8);
        assert_eq!(config.statevector_mode, mode);
        assert_eq!(config.unitary_mode, mode);
        assert_eq!(config.density_matrix_mode, mode);
        assert_eq!(config.tolerance, 1e-8);
    }
}
