//! Mauka LPM Library
//!
//! This library contains a concurrent, chunk-hashed prefix trie that finds
//! which available endpoints share the longest prefix with a request, plus the
//! configuration, error handling and benchmark workload built around it.
//!
//! # Architecture
//!
//! - `data_structures::lanai_trie` holds the trie and its two lookup strategies
//! - `config` loads layered settings from defaults, files and the environment
//! - `workload` drives concurrent lookups and times each lock strategy
//! - `error` defines the crate-wide error type

pub mod config;
pub mod data_structures;
pub mod error;
pub mod workload;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Mauka LPM.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
