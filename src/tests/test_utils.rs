//! Test utilities and fixtures for Mauka LPM.
//!
//! This module provides reusable proptest strategies and a small reference
//! model of longest-prefix matching used to check the trie.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};

use crate::data_structures::lanai_trie::EndpointSet;

/// Number of distinct endpoints generated by the strategies.
pub const ENDPOINT_POOL: usize = 4;

/// Builds an endpoint set from string literals.
pub fn endpoint_set(items: &[&str]) -> EndpointSet {
    items.iter().map(|s| s.to_string()).collect()
}

/// Name of the `i`-th pooled endpoint.
pub fn pooled_endpoint(i: usize) -> String {
    format!("endpoint_{i}")
}

/// Requests over a two letter alphabet so that generated requests share
/// prefixes often.
pub fn request_strategy(max_length: usize) -> BoxedStrategy<String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b')], 0..=max_length)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// A list of `(request, endpoint)` inserts.
pub fn inserts_strategy(max_inserts: usize, max_length: usize) -> BoxedStrategy<Vec<(String, String)>> {
    proptest::collection::vec(
        (request_strategy(max_length), 0..ENDPOINT_POOL).prop_map(|(r, e)| (r, pooled_endpoint(e))),
        0..=max_inserts,
    )
    .boxed()
}

/// A subset of the endpoint pool.
pub fn available_strategy() -> BoxedStrategy<EndpointSet> {
    proptest::collection::vec(any::<bool>(), ENDPOINT_POOL)
        .prop_map(|mask| {
            mask.into_iter()
                .enumerate()
                .filter(|(_, keep)| *keep)
                .map(|(i, _)| pooled_endpoint(i))
                .collect()
        })
        .boxed()
}

/// Longest prefix match computed by comparing raw chunk bytes, with no trie.
///
/// Returns the number of matched chunks and the narrowed endpoint set.
pub fn reference_match(
    inserts: &[(String, String)],
    query: &str,
    available: &EndpointSet,
    chunk_size: usize,
) -> (usize, EndpointSet) {
    let query_chunks: Vec<&[u8]> = query.as_bytes().chunks(chunk_size).collect();
    let mut selected = available.clone();
    let mut matched = 0;

    for depth in 0..query_chunks.len() {
        if selected.is_empty() {
            break;
        }

        let reached: EndpointSet = inserts
            .iter()
            .filter(|(request, _)| {
                let chunks: Vec<&[u8]> = request.as_bytes().chunks(chunk_size).collect();
                chunks.len() > depth && chunks[..=depth] == query_chunks[..=depth]
            })
            .map(|(_, endpoint)| endpoint.clone())
            .collect();

        let narrowed: EndpointSet = selected.intersection(&reached).cloned().collect();
        if narrowed.is_empty() {
            break;
        }
        selected = narrowed;
        matched = depth + 1;
    }

    (matched, selected)
}

/// Builds a current-thread runtime for use inside synchronous proptest bodies.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
}
