use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;
use num_complex::Complex;
use utilities::{hubbard_chain, hubbard_square, random_hermitian};
use vca_engine::{
    krylov::KrylovBuilder,
    vca::{VcaBuilder, VcaSettings},
};

pub fn bench_lanczos(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanczos");

    for dimension in [32, 64, 128, 256, 512].into_iter() {
        let operator = random_hermitian(dimension);
        let start = DVector::from_element(dimension, Complex::new(1_f64, 0_f64));
        group.bench_with_input(BenchmarkId::from_parameter(dimension), &dimension, |b, _| {
            b.iter(|| {
                KrylovBuilder::new()
                    .with_operator(black_box(&operator))
                    .with_start(black_box(&start))
                    .with_depth(32)
                    .build()
            })
        });
    }
    group.finish();
}

pub fn bench_cluster_greens_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_greens_function");

    for sites in [2, 4, 6].into_iter() {
        let model = hubbard_chain(sites, -1.0, 4.0);
        let vca = VcaBuilder::new()
            .with_model(&model)
            .with_settings(&VcaSettings::default())
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(sites), &sites, |b, _| {
            b.iter(|| vca.cluster_greens_function(black_box(0.5), black_box(2.0)))
        });
    }
    group.finish();
}

pub fn bench_lattice_greens_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_greens_function");

    for sites in [2, 4, 6].into_iter() {
        let model = hubbard_chain(sites, -1.0, 4.0);
        let vca = VcaBuilder::new()
            .with_model(&model)
            .with_settings(&VcaSettings::default())
            .build()
            .unwrap();
        let momentum = DVector::from_element(1, 0.3);
        group.bench_with_input(BenchmarkId::from_parameter(sites), &sites, |b, _| {
            b.iter(|| vca.lattice_greens_function(black_box(&momentum), black_box(0.5), 2.0))
        });
    }
    group.finish();
}

pub fn bench_plaquette(c: &mut Criterion) {
    let mut group = c.benchmark_group("plaquette");

    let model = hubbard_square(2, 2, -1.0, 8.0);
    let vca = VcaBuilder::new()
        .with_model(&model)
        .with_settings(&VcaSettings::default())
        .build()
        .unwrap();
    let momentum = DVector::from_vec(vec![0.5, 0.5]);
    group.bench_function("cluster", |b| {
        b.iter(|| vca.cluster_greens_function(black_box(0.5), black_box(2.0)))
    });
    group.bench_function("lattice", |b| {
        b.iter(|| vca.lattice_greens_function(black_box(&momentum), black_box(0.5), 2.0))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_lanczos,
    bench_cluster_greens_function,
    bench_lattice_greens_function,
    bench_plaquette
);
criterion_main!(benches);
