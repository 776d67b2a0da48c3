//! Data structures for Mauka LPM.
//!
//! This module contains specialized data structures optimized for
//! high-performance concurrent operations.

pub mod lanai_trie;

// Re-export common data structures
pub use lanai_trie::{LanaiTrie, LanaiTrieError, LanaiTrieResult, LockStrategy, PrefixMatch};
