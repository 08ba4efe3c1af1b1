//! Decompose a quantum Fourier transform into controlled single-qubit gates
//!
//! Run with: cargo run --example gate_decomposition -p qsim-compiler

use qsim_compiler::TwoLevelDecompositionSolver;
use qsim_gates::Gate;
use qsim_sim::Circuit;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let qft = Gate::quantum_fourier_transform(vec![2, 1, 0], false)?;
    let solver = TwoLevelDecompositionSolver::default();
    let gates = solver.decompose(&qft, 3)?;

    println!("{} → {} gates", qft, gates.len());
    for gate in gates.iter().take(12) {
        println!("  {}", gate);
    }
    if gates.len() > 12 {
        println!("  ...");
    }

    let original = Circuit::new(vec![qft], 3)?.unitary()?;
    let rebuilt = Circuit::new(gates, 3)?.unitary()?;
    println!(
        "\nUnitaries match: {}",
        rebuilt.is_approximately_equal(&original, 1e-6)
    );

    Ok(())
}
