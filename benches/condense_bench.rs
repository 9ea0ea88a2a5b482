//! Benchmarks for symbolic condensation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fea_condense::prelude::*;

fn condense_generic(size: usize, hinges: Vec<usize>) -> Condensation {
    let system = SymbolicSystem::generic(size).unwrap();
    let hinges = HingeSet::new(hinges, size).unwrap();
    condense(&system, &hinges, &CondensationOptions::default()).unwrap()
}

fn benchmark_truss(c: &mut Criterion) {
    c.bench_function("truss2d_one_hinge", |b| {
        b.iter(|| black_box(condense_generic(2, vec![0])))
    });
}

fn benchmark_beam(c: &mut Criterion) {
    c.bench_function("beam2d_both_pins", |b| {
        b.iter(|| black_box(condense_generic(4, vec![1, 3])))
    });
}

fn benchmark_frame(c: &mut Criterion) {
    c.bench_function("frame2d_both_pins", |b| {
        b.iter(|| black_box(condense_generic(6, vec![2, 5])))
    });
}

fn benchmark_report(c: &mut Criterion) {
    let condensation = condense_generic(4, vec![0, 3]);
    let options = CondensationOptions::default();
    c.bench_function("report_4dof", |b| {
        b.iter(|| black_box(Report::new(&condensation, &options).render()))
    });
}

criterion_group!(
    benches,
    benchmark_truss,
    benchmark_beam,
    benchmark_frame,
    benchmark_report,
);

criterion_main!(benches);
