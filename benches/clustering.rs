use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kmeans_hartigan::{KMeans, KMeansConfig};
use rand::prelude::*;

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    // Generate synthetic data, shaped like the wine dataset
    let mut rng = StdRng::seed_from_u64(1337);
    let (sample_cnt, sample_dims) = (178, 13);
    let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|_| rng.gen::<f64>()).collect();
    let kmean = KMeans::new(&samples, sample_cnt, sample_dims).unwrap().standardized();

    group.bench_function("fit_n178_d13_k3_restarts25", |b| {
        b.iter(|| kmean.fit(black_box(3), 25, 1234, &KMeansConfig::default()).unwrap())
    });
    group.bench_function("select_k_n178_d13_maxk10_restarts10", |b| {
        b.iter(|| kmean.select_k(black_box(10), 10, 1234, &KMeansConfig::default()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
