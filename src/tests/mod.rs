//! Test modules for Mauka LPM.
//!
//! This module contains crate-internal tests:
//! - Unit tests for configuration and error handling
//! - Behavioural and concurrency tests for the Lanai trie
//! - Property-based tests using proptest
//! - Shared strategies and fixtures

pub mod error_tests;
pub mod test_utils;
