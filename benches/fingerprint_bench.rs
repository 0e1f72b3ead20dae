use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use molfp::{
    EvaluationConfig, Evaluator, FingerprintConfig, FingerprintKind, Fingerprinter, is_subset,
};

#[path = "../tests/common/mod.rs"]
mod common;

const STEROID: &str = "CC12CCC3c4ccc(O)cc4CCC3C1CCC2O";

fn generate_bench(c: &mut Criterion) {
    let graph = common::parse_smiles(STEROID);
    let mut group = c.benchmark_group("generate");
    for kind in [
        FingerprintKind::PathHashed,
        FingerprintKind::Bloom,
        FingerprintKind::Scaffold,
        FingerprintKind::ShortestPath,
    ] {
        let fp = Fingerprinter::new(FingerprintConfig::new().with_kind(kind))
            .expect("valid bench config");
        group.bench_with_input(BenchmarkId::from_parameter(kind.as_str()), &graph, |b, g| {
            b.iter(|| black_box(fp.generate(black_box(g)).expect("fingerprint")));
        });
    }
    group.finish();
}

fn depth_bench(c: &mut Criterion) {
    let graph = common::parse_smiles(STEROID);
    let mut group = c.benchmark_group("path_hashed_depth");
    for depth in [3usize, 5, 7] {
        let fp = Fingerprinter::new(FingerprintConfig::new().with_max_depth(depth))
            .expect("valid bench config");
        group.bench_with_input(BenchmarkId::from_parameter(depth), &graph, |b, g| {
            b.iter(|| black_box(fp.generate(black_box(g)).expect("fingerprint")));
        });
    }
    group.finish();
}

fn screen_bench(c: &mut Criterion) {
    let fp = Fingerprinter::new(FingerprintConfig::default()).expect("valid bench config");
    let target = fp.generate(&common::parse_smiles(STEROID)).expect("target");
    let query = fp.generate(&common::parse_smiles("Oc1ccccc1")).expect("query");
    c.bench_function("is_subset_1024", |b| {
        b.iter(|| black_box(is_subset(black_box(&target), black_box(&query)).expect("same size")));
    });
}

fn evaluation_bench(c: &mut Criterion) {
    let generator = Arc::new(Fingerprinter::new(FingerprintConfig::default()).expect("config"));
    let mut group = c.benchmark_group("evaluate_corpus");
    for parallel in [false, true] {
        let mut evaluator = Evaluator::new(
            generator.clone(),
            Arc::new(common::substructure_match),
            EvaluationConfig::default().with_parallel(parallel),
        )
        .expect("evaluator");
        evaluator.extend(common::corpus());
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| black_box(evaluator.evaluate().expect("evaluation")));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    generate_bench,
    depth_bench,
    screen_bench,
    evaluation_bench
);
criterion_main!(benches);
