// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the Lanai Hash Trie.
//! Exercises the public API the way the benchmark workload does: a shared
//! prefix seeded for many endpoints, then bursts of concurrent lookups.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mauka_lpm_lib::data_structures::lanai_trie::{
    chunk_count, EndpointSet, LanaiTrie, LanaiTrieError, LockStrategy,
};
use mauka_lpm_lib::workload::{endpoint_ids, random_request, run_workload, seed_trie};

#[test]
fn test_invalid_chunk_sizes() {
    assert!(matches!(
        LanaiTrie::new(0),
        Err(LanaiTrieError::InvalidConfiguration(_))
    ));
    for chunk_size in [0i64, -1, -128] {
        assert!(matches!(
            LanaiTrie::from_signed(chunk_size),
            Err(LanaiTrieError::InvalidConfiguration(_))
        ));
    }
}

#[tokio::test]
async fn test_benchmark_shape_both_strategies() {
    let trie = Arc::new(LanaiTrie::new(128).unwrap());
    let endpoints = endpoint_ids(50);
    let request = random_request(2048, Some(1234));
    seed_trie(&trie, &request[..1024], &endpoints).await;

    // Root plus one node per prefix chunk.
    assert_eq!(trie.node_count().await, 1 + 1024 / 128);

    let available = Arc::new(endpoints.clone());
    let request: Arc<str> = Arc::from(request);
    for strategy in LockStrategy::ALL {
        let run = run_workload(
            Arc::clone(&trie),
            strategy,
            200,
            Arc::clone(&available),
            Arc::clone(&request),
        )
        .await
        .unwrap();

        let sample = run.sample.expect("no lookup ran");
        assert_eq!(sample.matched_length, 1024, "{strategy}");
        assert_eq!(sample.matched_chunks, 8, "{strategy}");
        assert_eq!(sample.endpoints, endpoints, "{strategy}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_multi_thread_lookups_agree() {
    let trie = Arc::new(LanaiTrie::new(16).unwrap());
    let endpoints = endpoint_ids(20);
    let request = random_request(256, Some(5));
    seed_trie(&trie, &request[..128], &endpoints).await;

    // One endpoint knows a longer prefix.
    trie.insert(&request[..192], "endpoint_7").await;

    let available = Arc::new(endpoints);
    let request: Arc<str> = Arc::from(request);
    for strategy in LockStrategy::ALL {
        let run = run_workload(
            Arc::clone(&trie),
            strategy,
            500,
            Arc::clone(&available),
            Arc::clone(&request),
        )
        .await
        .unwrap();

        let sample = run.sample.unwrap();
        assert_eq!(sample.matched_length, 192, "{strategy}");
        let expected: EndpointSet = ["endpoint_7".to_string()].into_iter().collect();
        assert_eq!(sample.endpoints, expected, "{strategy}");
    }
}

#[tokio::test]
async fn test_chunk_count_matches_walk() {
    let trie = LanaiTrie::new(7).unwrap();
    let request = random_request(100, Some(9));
    trie.insert(&request, "e").await;

    let available: EndpointSet = ["e".to_string()].into_iter().collect();
    let result = trie.match_default(&request, &available).await;
    assert_eq!(result.matched_chunks, chunk_count(100, NonZeroUsize::new(7).unwrap()));
    assert_eq!(result.matched_length, 100);
    assert_eq!(trie.chunk_hashes(&request).len(), result.matched_chunks);
}
