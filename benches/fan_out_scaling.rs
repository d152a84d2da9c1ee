//! ワーカー数によるFan-Out/Fan-Inのスケーリング比較ベンチマーク
//!
//! 同じシードの乱数列から素数をn個集める時間を、単一ワーカーとK並列で比較する

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use stream_pipeline::{
    primes::{is_prime, random_number_producer},
    run_fan_out_fan_in, run_single_worker, DefaultPipelineConfig, NoOpPipelineReporter,
};
use tokio::runtime::Runtime;

const PRIME_COUNT: usize = 10;
const MAX_NUMBER: u64 = 2_000_000;
const SEED: u64 = 42;

fn benchmark_single_worker(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("Single Worker");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    group.bench_function("naive", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let config = DefaultPipelineConfig::new(1).with_progress_reporting(false);
                let producer = random_number_producer(MAX_NUMBER, Some(SEED)).unwrap();
                let (primes, _) = run_single_worker(
                    config,
                    NoOpPipelineReporter::new(),
                    producer,
                    |n: &u64| is_prime(*n),
                    PRIME_COUNT,
                )
                .await
                .unwrap();
                std::hint::black_box(primes)
            })
        })
    });

    group.finish();
}

fn benchmark_fan_out_scaling(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("Fan-Out Scaling");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let cpu_count = num_cpus::get().max(1);
    let mut worker_counts = vec![1, 2, 4, cpu_count];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for workers in worker_counts {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                runtime.block_on(async {
                    let config = DefaultPipelineConfig::new(workers).with_progress_reporting(false);
                    let producer = random_number_producer(MAX_NUMBER, Some(SEED)).unwrap();
                    let (primes, _) = run_fan_out_fan_in(
                        config,
                        NoOpPipelineReporter::new(),
                        producer,
                        |n: &u64| is_prime(*n),
                        PRIME_COUNT,
                    )
                    .await
                    .unwrap();
                    std::hint::black_box(primes)
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_worker, benchmark_fan_out_scaling);
criterion_main!(benches);
