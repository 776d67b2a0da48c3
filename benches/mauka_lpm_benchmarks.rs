//! Mauka LPM Benchmarks
//!
//! Compares the coarse and fine lock strategies of the Lanai Hash Trie under
//! increasing numbers of concurrent lookups, plus raw insert throughput.
//! The benchmarks are implemented using the Criterion framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::sync::Arc;
use std::time::Duration;

use mauka_lpm_lib::data_structures::lanai_trie::{LanaiTrie, LockStrategy};
use mauka_lpm_lib::workload::{endpoint_ids, random_request, run_workload, seed_trie};

fn current_thread_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

/// Benchmark concurrent lookups for each lock strategy
fn bench_lanai_lookups(c: &mut Criterion) {
    let runtime = current_thread_runtime();

    let mut group = c.benchmark_group("lanai_trie_lookup");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(3));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(20);

    let trie = Arc::new(LanaiTrie::new(128).unwrap());
    let endpoints = endpoint_ids(500);
    let request = random_request(2048, Some(0x5eed));
    runtime.block_on(seed_trie(&trie, &request[..1024], &endpoints));

    let available = Arc::new(endpoints);
    let request: Arc<str> = Arc::from(request);

    for tasks in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*tasks as u64));
        for strategy in LockStrategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), tasks),
                tasks,
                |b, &tasks| {
                    b.to_async(&runtime).iter(|| {
                        let trie = Arc::clone(&trie);
                        let available = Arc::clone(&available);
                        let request = Arc::clone(&request);
                        async move {
                            black_box(
                                run_workload(trie, strategy, tasks, available, request)
                                    .await
                                    .unwrap(),
                            )
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark inserts of a shared prefix for many endpoints
fn bench_lanai_inserts(c: &mut Criterion) {
    let runtime = current_thread_runtime();

    let mut group = c.benchmark_group("lanai_trie_insert");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    let request = random_request(1024, Some(7));
    let request = request.as_str();
    for chunk_size in [32usize, 128, 512].iter() {
        group.bench_with_input(
            BenchmarkId::new("shared_prefix", chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.to_async(&runtime).iter(|| async move {
                    let trie = LanaiTrie::new(chunk_size).unwrap();
                    for i in 0..64 {
                        trie.insert(black_box(request), &format!("endpoint_{i}"))
                            .await;
                    }
                    trie
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_lanai_lookups, bench_lanai_inserts
}

criterion_main!(benches);
