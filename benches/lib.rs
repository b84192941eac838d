use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    kernel::bench_qpower2,
    kernel::bench_ueclipse,
    scale::bench_scaled_transit_fit,
    scale::bench_minerr_transit_fit,
);
criterion_main!(benches);
