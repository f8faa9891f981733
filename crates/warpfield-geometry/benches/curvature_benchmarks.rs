//! Curvature derivation benchmarks.
//!
//! Measures the full symbolic pipeline pieces: Christoffel symbols, the
//! 16-entry Ricci derivation, and the scalar trace. No acceptance
//! threshold -- simplification cost is accepted as-is -- but the numbers
//! catch accidental blowups in the normal form.
//!
//! Run with: `cargo bench --bench curvature_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use warpfield_geometry::prelude::*;
use warpfield_symbolic::prelude::*;

fn bench_christoffel(c: &mut Criterion) {
    let ctx = SymbolContext::warp_bubble();
    let opts = SimplifyOptions::default();
    let metric = warp_bubble_metric(&ctx);

    c.bench_function("christoffel_symbols", |b| {
        b.iter(|| christoffel(black_box(&metric), &ctx, &opts).unwrap());
    });
}

fn bench_ricci(c: &mut Criterion) {
    let ctx = SymbolContext::warp_bubble();
    let opts = SimplifyOptions::default();
    let metric = warp_bubble_metric(&ctx);

    c.bench_function("ricci_tensor_full", |b| {
        b.iter(|| ricci_tensor(black_box(&metric), &ctx, &opts).unwrap());
    });

    let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
    c.bench_function("ricci_scalar_trace", |b| {
        b.iter(|| ricci_scalar(black_box(&metric), &ricci, &opts).unwrap());
    });
}

fn bench_field_equations(c: &mut Criterion) {
    let ctx = SymbolContext::warp_bubble();
    let opts = SimplifyOptions::default();
    let metric = warp_bubble_metric(&ctx);
    let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
    let scalar = ricci_scalar(&metric, &ricci, &opts).unwrap();

    c.bench_function("einstein_and_stress_energy", |b| {
        b.iter(|| {
            let einstein =
                einstein_tensor(black_box(&metric), &ricci, &scalar, &opts).unwrap();
            stress_energy_tensor(&einstein, &opts).unwrap()
        });
    });
}

criterion_group!(benches, bench_christoffel, bench_ricci, bench_field_equations);
criterion_main!(benches);
