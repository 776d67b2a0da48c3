// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Lanai Hash Trie.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LanaiTrieError;

/// Default chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// How long a lookup holds node guards while walking the trie.
///
/// Both strategies stop at the same place on a quiescent trie; they differ only
/// in how much work happens inside each critical section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LockStrategy {
    /// Hold the parent's guard across the child lookup, the read of the
    /// child's endpoints and the intersection.
    Coarse,

    /// Hold a guard only to fetch the child reference, then only to copy the
    /// child's endpoints; intersect outside any guard.
    #[default]
    Fine,
}

impl LockStrategy {
    /// Both strategies, coarse first.
    pub const ALL: [LockStrategy; 2] = [LockStrategy::Coarse, LockStrategy::Fine];

    /// Lowercase name used in configuration files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coarse => "coarse",
            Self::Fine => "fine",
        }
    }
}

impl fmt::Display for LockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockStrategy {
    type Err = LanaiTrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coarse" => Ok(Self::Coarse),
            "fine" => Ok(Self::Fine),
            other => Err(LanaiTrieError::InvalidConfiguration(format!(
                "unknown lock strategy '{other}'"
            ))),
        }
    }
}

/// Configuration for the Lanai Hash Trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanaiTrieConfig {
    /// Chunk size in bytes; zero is rejected when the trie is built
    chunk_size: usize,

    /// Strategy used by `match_default`
    lock_strategy: LockStrategy,
}

impl LanaiTrieConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - chunk_size: 128
    /// - lock_strategy: fine
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            lock_strategy: LockStrategy::default(),
        }
    }

    /// Set the chunk size in bytes.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the strategy used by lookups that do not name one.
    pub fn with_lock_strategy(mut self, lock_strategy: LockStrategy) -> Self {
        self.lock_strategy = lock_strategy;
        self
    }

    /// Get the configured lock strategy
    pub fn get_lock_strategy(&self) -> LockStrategy {
        self.lock_strategy
    }

    /// Checks the chunk size and returns it in its validated form.
    pub fn validated_chunk_size(&self) -> Result<NonZeroUsize, LanaiTrieError> {
        NonZeroUsize::new(self.chunk_size).ok_or_else(|| {
            LanaiTrieError::InvalidConfiguration(
                "chunk_size must be a positive integer".to_string(),
            )
        })
    }
}

impl Default for LanaiTrieConfig {
    fn default() -> Self {
        Self::new()
    }
}
