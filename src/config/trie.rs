//! Trie configuration module.

use super::{ConfigResult, Validate};
use crate::data_structures::lanai_trie::{
    LanaiTrie, LanaiTrieConfig, LanaiTrieError, LanaiTrieResult, LockStrategy, DEFAULT_CHUNK_SIZE,
};
use crate::error::config::ConfigError;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trie configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrieConfig {
    /// Chunk size in bytes. Signed so that a negative value in a file or the
    /// environment is reported as out of range instead of as a parse failure.
    #[serde(deserialize_with = "deserialize_strict_integer")]
    pub chunk_size: i64,

    /// Lock strategy used when a lookup does not name one
    pub lock_strategy: LockStrategy,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE as i64,
            lock_strategy: LockStrategy::default(),
        }
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size <= 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.chunk_size".to_string(),
                message: format!("must be a positive integer, got {}", self.chunk_size),
            });
        }
        Ok(())
    }
}

impl TrieConfig {
    /// Converts into the data structure's own configuration.
    pub fn to_trie_config(&self) -> LanaiTrieResult<LanaiTrieConfig> {
        let chunk_size = usize::try_from(self.chunk_size).map_err(|_| {
            LanaiTrieError::InvalidConfiguration(format!(
                "chunk_size must be a positive integer, got {}",
                self.chunk_size
            ))
        })?;
        Ok(LanaiTrieConfig::new()
            .with_chunk_size(chunk_size)
            .with_lock_strategy(self.lock_strategy))
    }

    /// Builds an empty trie from this configuration.
    pub fn build(&self) -> LanaiTrieResult<LanaiTrie> {
        LanaiTrie::with_config(self.to_trie_config()?)
    }
}

/// Deserializes an integer, rejecting floating point input instead of rounding it.
fn deserialize_strict_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct StrictInteger;

    impl Visitor<'_> for StrictInteger {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(StrictInteger)
}
