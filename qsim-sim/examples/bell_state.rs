//! Bell state under every transformation strategy, then through a noisy channel
//!
//! Run with: cargo run --example bell_state -p qsim-sim

use qsim_gates::{Gate, Noise, Operator};
use qsim_sim::{Circuit, NoiseCircuit, SimulatorConfig, TransformationMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gates = vec![Gate::hadamard(0), Gate::controlled_not(1, 0)];

    println!("=== Bell state ===\n");
    let modes = [
        TransformationMode::Direct {
            calculation_concurrency: 2,
        },
        TransformationMode::RowByRow {
            calculation_concurrency: 2,
            expansion_concurrency: 1,
        },
        TransformationMode::ElementByElement {
            calculation_concurrency: 2,
        },
        TransformationMode::FullMatrix {
            expansion_concurrency: 2,
        },
    ];
    for mode in modes {
        let config = SimulatorConfig::new().with_mode(mode);
        let circuit = Circuit::with_config(gates.clone(), 2, config)?;
        println!("{:?}", mode);
        for (bits, probability) in circuit.summarized_probabilities("00")? {
            println!("  |{}⟩: {:.4}", bits, probability);
        }
    }

    println!("\n=== Unitary ===\n");
    let unitary = Circuit::new(gates.clone(), 2)?.unitary()?;
    println!("{:?}", unitary);

    println!("\n=== Bit flip on qubit 1 (p = 0.1) ===\n");
    let mut operators: Vec<Operator> = gates.into_iter().map(Into::into).collect();
    operators.push(Noise::bit_flip(0.1, 1).into());
    let noisy = NoiseCircuit::new(operators, 2)?;
    let rho = noisy.density_matrix()?;
    println!("purity: {:.4}", rho.purity());
    for (bits, probability) in rho.summarized_probabilities() {
        println!("  |{}⟩: {:.4}", bits, probability);
    }

    Ok(())
}
