use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kmeans_partitioned::{partitioned, KMeans, KMeansConfig, Point, Primitive};
use rand::prelude::*;

fn random_samples<T: Primitive>(rnd: &mut StdRng, sample_cnt: usize) -> Vec<Point<T>> {
    (0..sample_cnt)
        .map(|_| Point::new(rnd.gen_range(T::zero(), T::one()), rnd.gen_range(T::zero(), T::one())))
        .collect()
}

fn complete_lloyd<T: Primitive>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("lloyd_{}", name));
    for &(sample_cnt, k) in &[(2000, 10), (20000, 32)] {
        let mut rnd = StdRng::seed_from_u64(1337);
        let kmean = KMeans::new(random_samples::<T>(&mut rnd, sample_cnt));
        let conf = KMeansConfig::build().random_generator(rnd).build();
        group.bench_with_input(BenchmarkId::new(format!("k{}", k), sample_cnt), &k, |b, &k| {
            b.iter(|| kmean.kmeans_lloyd(k, 32, KMeans::init_kmeanplusplus, &conf))
        });
    }
    group.finish();
}

fn lloyd_f32(c: &mut Criterion) { complete_lloyd::<f32>(c, "f32"); }
fn lloyd_f64(c: &mut Criterion) { complete_lloyd::<f64>(c, "f64"); }

fn partitioned_round(c: &mut Criterion) {
    let mut rnd = StdRng::seed_from_u64(1337);
    let samples = random_samples::<f64>(&mut rnd, 100_000);
    let centroids = samples[..16].to_vec();

    let mut group = c.benchmark_group("partitioned_round");
    for &partition_cnt in &[1usize, 8, 64] {
        let partitions: Vec<&[Point<f64>]> = samples.chunks(samples.len() / partition_cnt).collect();
        group.bench_with_input(BenchmarkId::from_parameter(partition_cnt), &partitions, |b, partitions| {
            b.iter(|| partitioned::run_round(black_box(partitions), black_box(&centroids)))
        });
    }
    group.finish();
}

fn init_kmeanplusplus(c: &mut Criterion) {
    let mut rnd = StdRng::seed_from_u64(1337);
    let kmean = KMeans::new(random_samples::<f64>(&mut rnd, 20000));
    let conf = KMeansConfig::build().random_generator(rnd).build();
    // A single round after the init keeps the measurement dominated by the seeding
    c.bench_function("init_kmeanplusplus/20000", |b| {
        b.iter(|| kmean.kmeans_lloyd(32, 1, KMeans::init_kmeanplusplus, &conf))
    });
}

criterion_group!(benches, lloyd_f32, lloyd_f64, partitioned_round, init_kmeanplusplus);
criterion_main!(benches);
