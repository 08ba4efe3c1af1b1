//! Density matrix simulation through noise channels

use approx::assert_relative_eq;
use qsim_core::{Complex64, Matrix, QuantumError};
use qsim_gates::{matrices, Gate, Noise, Operator};
use qsim_sim::{NoiseCircuit, SimulatorConfig, SimulatorError, TransformationMode};
use qsim_state::{DensityMatrix, Statevector};

const EPSILON: f64 = 1e-9;

fn modes() -> [TransformationMode; 4] {
    [
        TransformationMode::Direct {
            calculation_concurrency: 2,
        },
        TransformationMode::RowByRow {
            calculation_concurrency: 2,
            expansion_concurrency: 2,
        },
        TransformationMode::ElementByElement {
            calculation_concurrency: 1,
        },
        TransformationMode::FullMatrix {
            expansion_concurrency: 2,
        },
    ]
}

fn run(operators: Vec<Operator>, qubit_count: usize, bits: &str) -> Vec<DensityMatrix> {
    modes()
        .into_iter()
        .map(|mode| {
            let config = SimulatorConfig::new().with_density_matrix_mode(mode);
            NoiseCircuit::with_config(operators.clone(), qubit_count, config)
                .unwrap()
                .density_matrix_after_inputting(bits)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_certain_bit_flip_acts_as_not() {
    let noisy = run(vec![Noise::bit_flip(1.0, 1).into()], 2, "01");
    let expected = DensityMatrix::from_statevector(&Statevector::from_bits("11").unwrap());
    for rho in noisy {
        assert!(rho.matrix().is_approximately_equal(expected.matrix(), EPSILON));
    }
}

#[test]
fn test_full_depolarizing_mixes_completely() {
    let operators = vec![Gate::hadamard(0).into(), Noise::depolarizing(0.75, 0).into()];
    let mixed = DensityMatrix::maximally_mixed(1).unwrap();
    for rho in run(operators, 1, "0") {
        assert_relative_eq!(rho.purity(), 0.5, epsilon = EPSILON);
        assert!(rho.matrix().is_approximately_equal(mixed.matrix(), EPSILON));
    }
}

#[test]
fn test_partial_depolarizing_reduces_purity() {
    let operators = vec![Gate::hadamard(0).into(), Noise::depolarizing(0.3, 0).into()];
    for rho in run(operators, 1, "0") {
        // Bloch vector shrinks by 1 - 4p/3
        let shrink: f64 = 1.0 - 0.4;
        assert_relative_eq!(rho.purity(), (1.0 + shrink * shrink) / 2.0, epsilon = EPSILON);
    }
}

#[test]
fn test_phase_flip_kills_coherence() {
    let operators = vec![Gate::hadamard(0).into(), Noise::phase_flip(0.5, 0).into()];
    for rho in run(operators, 1, "0") {
        assert_relative_eq!(rho.get(0, 1).norm(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(rho.get(0, 0).re, 0.5, epsilon = EPSILON);
        // populations survive
        let summary = rho.summarized_probabilities();
        assert_relative_eq!(summary["0"], 0.5, epsilon = EPSILON);
        assert_relative_eq!(summary["1"], 0.5, epsilon = EPSILON);
    }
}

#[test]
fn test_amplitude_damping_relaxes_to_ground() {
    let operators = vec![Noise::amplitude_damping(0.25, 0).into()];
    for rho in run(operators, 2, "11") {
        let probabilities = rho.measure(&[0]).unwrap();
        assert_relative_eq!(probabilities[0], 0.25, epsilon = EPSILON);
        assert_relative_eq!(probabilities[1], 0.75, epsilon = EPSILON);
        // qubit 1 is untouched
        assert_relative_eq!(rho.measure(&[1]).unwrap()[1], 1.0, epsilon = EPSILON);
    }
}

#[test]
fn test_custom_kraus_channel_on_two_qubits() {
    // swap qubits with probability 1/2
    let half = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let swap = Matrix::permutation(&[0, 2, 1, 3]).unwrap();
    let operators = vec![
        Matrix::identity(4).unwrap().scaled(half),
        swap.scaled(half),
    ];
    let channel = Noise::kraus(operators, vec![1, 0]);
    for rho in run(vec![channel.into()], 2, "01") {
        let summary = rho.summarized_probabilities();
        assert_eq!(summary.len(), 2);
        assert_relative_eq!(summary["01"], 0.5, epsilon = EPSILON);
        assert_relative_eq!(summary["10"], 0.5, epsilon = EPSILON);
    }
}

#[test]
fn test_noise_free_run_matches_gate_circuit() {
    let gates = vec![
        Gate::hadamard(0),
        Gate::controlled_matrix(matrices::hadamard(), vec![1], 0),
    ];
    let operators: Vec<Operator> = gates.iter().cloned().map(Into::into).collect();
    let circuit = qsim_sim::Circuit::new(gates, 2).unwrap();
    let expected = DensityMatrix::from_statevector(&circuit.statevector().unwrap());
    for rho in run(operators, 2, "00") {
        assert!(rho.matrix().is_approximately_equal(expected.matrix(), EPSILON));
    }
}

#[test]
fn test_invalid_channel_reports_its_index() {
    let circuit = NoiseCircuit::new(
        vec![
            Gate::hadamard(0).into(),
            Noise::amplitude_damping(0.1, 0).into(),
            Noise::kraus(vec![matrices::hadamard().scaled(Complex64::new(0.5, 0.0))], vec![0]).into(),
        ],
        1,
    )
    .unwrap();
    assert!(matches!(
        circuit.density_matrix(),
        Err(SimulatorError::GateExtractionFailed {
            gate_index: 2,
            source: QuantumError::InvalidNoise(_),
        })
    ));
}

#[test]
fn test_initial_state_must_fit_register() {
    let circuit = NoiseCircuit::new(Vec::new(), 2).unwrap();
    assert_eq!(
        circuit.density_matrix_from(DensityMatrix::zero(3).unwrap()),
        Err(SimulatorError::QubitCountMismatch {
            expected: 2,
            actual: 3
        })
    );
}
