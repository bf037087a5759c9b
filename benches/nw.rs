use criterion::{criterion_group, criterion_main, Criterion};
use pairwise_dp::{
    generate::{generate_pair, ErrorModel, GenerateOptions},
    LinearCost, NW,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn bench(c: &mut Criterion) {
    let nw = NW::new(LinearCost::default());
    for n in [100, 1000, 3000] {
        let mut c = c.benchmark_group(format!("{n}"));
        for e in [0.05, 0.2] {
            let opt = GenerateOptions {
                length: n,
                error_rate: e,
                error_model: ErrorModel::Uniform,
            };
            let (ref a, ref b) = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(31415));
            c.bench_function(format!("{e}/cost"), |bb| bb.iter(|| nw.cost(a, b)));
            c.bench_function(format!("{e}/matrix"), |bb| bb.iter(|| nw.matrix(a, b)));
            c.bench_function(format!("{e}/align"), |bb| bb.iter(|| nw.align(a, b)));
        }
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_millis(1000)).warm_up_time(Duration::from_millis(1000)).sample_size(10);
    targets = bench
);
criterion_main!(benches);
