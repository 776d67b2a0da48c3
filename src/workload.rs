//! Benchmark workload for the Lanai Hash Trie.
//!
//! Seeds a trie with a shared prefix for every endpoint, then fires a burst of
//! concurrent lookups per lock strategy and measures wall-clock time for each
//! burst.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::workload::{RuntimeFlavor, WorkloadConfig};
use crate::config::LpmConfig;
use crate::data_structures::lanai_trie::{EndpointSet, LanaiTrie, LockStrategy, PrefixMatch};
use crate::error::{LpmError, LpmResult};

/// Endpoint identifiers `endpoint_0 .. endpoint_{count-1}`.
pub fn endpoint_ids(count: usize) -> EndpointSet {
    (0..count).map(|i| format!("endpoint_{i}")).collect()
}

/// Random lowercase ASCII request of `length` bytes.
pub fn random_request(length: usize, seed: Option<u64>) -> String {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    rng.sample_iter(Uniform::new_inclusive(b'a', b'z'))
        .take(length)
        .map(char::from)
        .collect()
}

/// Builds the runtime described by the workload configuration.
pub fn build_runtime(config: &WorkloadConfig) -> std::io::Result<Runtime> {
    match config.runtime {
        RuntimeFlavor::CurrentThread => Builder::new_current_thread().enable_all().build(),
        RuntimeFlavor::MultiThread => Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .enable_all()
            .build(),
    }
}

/// Inserts `prefix` once for every endpoint.
pub async fn seed_trie(trie: &LanaiTrie, prefix: &str, endpoints: &EndpointSet) {
    for endpoint in endpoints {
        trie.insert(prefix, endpoint).await;
    }
}

/// Outcome of one burst of lookups.
#[derive(Debug, Clone)]
pub struct WorkloadRun {
    /// Wall-clock time from the first spawn until every task finished
    pub elapsed: Duration,

    /// Result of the first task, all tasks see the same quiescent trie
    pub sample: Option<PrefixMatch>,
}

/// Runs `num_tasks` concurrent lookups of `request` with `strategy`.
pub async fn run_workload(
    trie: Arc<LanaiTrie>,
    strategy: LockStrategy,
    num_tasks: usize,
    available: Arc<EndpointSet>,
    request: Arc<str>,
) -> LpmResult<WorkloadRun> {
    let start = Instant::now();

    let handles = (0..num_tasks).map(|_| {
        let trie = Arc::clone(&trie);
        let available = Arc::clone(&available);
        let request = Arc::clone(&request);
        tokio::spawn(async move {
            trie.longest_prefix_match(&request, &available, strategy)
                .await
        })
    });

    let mut sample = None;
    for joined in join_all(handles).await {
        let result = joined.map_err(|e| LpmError::Runtime(format!("lookup task failed: {e}")))?;
        sample.get_or_insert(result);
    }

    let elapsed = start.elapsed();
    debug!(%strategy, num_tasks, ?elapsed, "Workload finished");
    Ok(WorkloadRun { elapsed, sample })
}

/// Timings for both lock strategies over the same trie and request.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Number of endpoints inserted
    pub num_endpoints: usize,
    /// Concurrent lookups per strategy
    pub num_tasks: usize,
    /// Request length in bytes
    pub request_length: usize,
    /// Trie chunk size in bytes
    pub chunk_size: usize,
    /// Bytes matched by a lookup of the request
    pub matched_length: usize,
    /// Seconds taken by the coarse strategy
    pub coarse_seconds: f64,
    /// Seconds taken by the fine strategy
    pub fine_seconds: f64,
}

impl BenchmarkReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> LpmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Percentage by which the fine strategy beat the coarse one; negative
    /// when it was slower.
    pub fn improvement_percent(&self) -> f64 {
        if self.coarse_seconds == 0.0 {
            return 0.0;
        }
        (self.coarse_seconds - self.fine_seconds) / self.coarse_seconds * 100.0
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Trie Performance Benchmark ---")?;
        writeln!(
            f,
            "Configuration: {} endpoints, {} concurrent tasks, chunk size {}.",
            self.num_endpoints, self.num_tasks, self.chunk_size
        )?;
        writeln!(
            f,
            "Matched {} of {} request bytes.",
            self.matched_length, self.request_length
        )?;
        writeln!(f, "  coarse lock holding: {:.4} seconds", self.coarse_seconds)?;
        writeln!(f, "  fine lock holding:   {:.4} seconds", self.fine_seconds)?;
        if self.fine_seconds < self.coarse_seconds {
            write!(
                f,
                "Fine lock holding was faster by {:.2}%.",
                self.improvement_percent()
            )
        } else {
            write!(f, "Coarse lock holding was unexpectedly faster.")
        }
    }
}

/// Seeds a trie and times both lock strategies against it.
pub async fn run_benchmark(config: &LpmConfig) -> LpmResult<BenchmarkReport> {
    let workload = &config.workload;
    let trie = Arc::new(config.trie.build()?);

    let endpoints = endpoint_ids(workload.num_endpoints);
    let request = random_request(workload.request_length, workload.seed);
    let prefix = &request[..workload.prefix_length()];

    info!(
        num_endpoints = workload.num_endpoints,
        prefix_length = prefix.len(),
        "Seeding trie"
    );
    seed_trie(&trie, prefix, &endpoints).await;
    info!(nodes = trie.node_count().await, "Seeding complete");

    let available = Arc::new(endpoints);
    let request: Arc<str> = Arc::from(request);

    let mut timings = [Duration::ZERO; 2];
    let mut matched_length = 0;
    for (slot, strategy) in LockStrategy::ALL.into_iter().enumerate() {
        info!(%strategy, num_tasks = workload.num_tasks, "Running lookups");
        let run = run_workload(
            Arc::clone(&trie),
            strategy,
            workload.num_tasks,
            Arc::clone(&available),
            Arc::clone(&request),
        )
        .await?;
        info!(%strategy, seconds = run.elapsed.as_secs_f64(), "Lookups complete");
        timings[slot] = run.elapsed;
        if let Some(sample) = run.sample {
            matched_length = sample.matched_length;
        }
    }

    Ok(BenchmarkReport {
        num_endpoints: workload.num_endpoints,
        num_tasks: workload.num_tasks,
        request_length: workload.request_length,
        chunk_size: trie.chunk_size(),
        matched_length,
        coarse_seconds: timings[0].as_secs_f64(),
        fine_seconds: timings[1].as_secs_f64(),
    })
}
