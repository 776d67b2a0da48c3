// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Lanai Hash Trie.
//!
//! Construction is the only fallible step. Lookups that stop early are a
//! normal outcome and are reported through the returned match, not here.

/// Errors that can occur in Lanai Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum LanaiTrieError {
    /// The trie was configured with an unusable chunk size
    #[error("Invalid trie configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LanaiTrieError::InvalidConfiguration("chunk_size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid trie configuration: chunk_size must be positive"
        );
    }
}
