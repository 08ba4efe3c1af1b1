//! Benchmark the gate application strategies against each other

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsim_gates::Gate;
use qsim_sim::{Circuit, SimulatorConfig, TransformationMode};

fn layered_circuit(qubit_count: usize, depth: usize) -> Vec<Gate> {
    let mut gates = Vec::with_capacity(qubit_count * depth);
    for _ in 0..depth {
        gates.extend(Gate::hadamards(0..qubit_count));
        for target in 1..qubit_count {
            gates.push(Gate::controlled_not(target, target - 1));
        }
    }
    gates
}

fn modes(threads: usize) -> Vec<(&'static str, TransformationMode)> {
    vec![
        (
            "Direct",
            TransformationMode::Direct {
                calculation_concurrency: threads,
            },
        ),
        (
            "RowByRow",
            TransformationMode::RowByRow {
                calculation_concurrency: threads,
                expansion_concurrency: 1,
            },
        ),
        (
            "ElementByElement",
            TransformationMode::ElementByElement {
                calculation_concurrency: threads,
            },
        ),
        (
            "FullMatrix",
            TransformationMode::FullMatrix {
                expansion_concurrency: threads,
            },
        ),
    ]
}

fn bench_statevector(c: &mut Criterion) {
    let mut group = c.benchmark_group("Statevector");
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    for qubit_count in [4, 6, 8] {
        let gates = layered_circuit(qubit_count, 4);
        for concurrency in [1, threads] {
            for (name, mode) in modes(concurrency) {
                let config = SimulatorConfig::new().with_statevector_mode(mode);
                let circuit = Circuit::with_config(gates.clone(), qubit_count, config).unwrap();
                let label = format!("{}_{}thr", name, concurrency);
                group.bench_with_input(BenchmarkId::new(label, qubit_count), &qubit_count, |b, _| {
                    b.iter(|| black_box(circuit.statevector().unwrap()))
                });
            }
        }
    }
    group.finish();
}

fn bench_unitary(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unitary");
    group.sample_size(10);

    for qubit_count in [3, 5] {
        let gates = layered_circuit(qubit_count, 2);
        for (name, mode) in modes(2) {
            let config = SimulatorConfig::new().with_unitary_mode(mode);
            let circuit = Circuit::with_config(gates.clone(), qubit_count, config).unwrap();
            group.bench_with_input(BenchmarkId::new(name, qubit_count), &qubit_count, |b, _| {
                b.iter(|| black_box(circuit.unitary().unwrap()))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_statevector, bench_unitary);
criterion_main!(benches);
