// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Chunking and hashing policy for the Lanai Hash Trie.
//!
//! A request is cut into consecutive, non-overlapping byte windows of
//! `chunk_size` bytes (the last window may be shorter) and every window is
//! reduced to a 64-bit FNV-1a key. Equal windows always produce equal keys,
//! which is what lets two requests share a trie path.

use std::hash::Hasher;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Hash the raw bytes of one chunk.
///
/// The bytes are fed straight into the hasher without a length prefix, so the
/// key depends only on the window contents. Chunk bytes are not kept in the
/// trie, so two windows that collide share a node.
pub fn chunk_hash(bytes: &[u8]) -> u64 {
    let mut hasher = fnv::FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Number of chunks a request of `len` bytes decomposes into.
pub fn chunk_count(len: usize, chunk_size: NonZeroUsize) -> usize {
    len.div_ceil(chunk_size.get())
}

/// Lazy sequence of chunk keys for one request.
///
/// The iterator owns no shared cursor: cloning it (or building a new one from
/// the same text) restarts the sequence from the first chunk.
#[derive(Debug, Clone)]
pub struct ChunkHashes<'a> {
    remaining: &'a [u8],
    chunk_size: NonZeroUsize,
}

impl<'a> ChunkHashes<'a> {
    /// Creates the key sequence for `text`.
    pub fn new(text: &'a str, chunk_size: NonZeroUsize) -> Self {
        Self::from_bytes(text.as_bytes(), chunk_size)
    }

    /// Creates the key sequence for an arbitrary byte slice.
    pub fn from_bytes(bytes: &'a [u8], chunk_size: NonZeroUsize) -> Self {
        Self {
            remaining: bytes,
            chunk_size,
        }
    }

    /// Bytes not yet consumed by the iterator.
    pub fn remaining_bytes(&self) -> usize {
        self.remaining.len()
    }
}

impl Iterator for ChunkHashes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining.is_empty() {
            return None;
        }

        let take = self.chunk_size.get().min(self.remaining.len());
        let (window, rest) = self.remaining.split_at(take);
        self.remaining = rest;
        Some(chunk_hash(window))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = chunk_count(self.remaining.len(), self.chunk_size);
        (count, Some(count))
    }
}

impl ExactSizeIterator for ChunkHashes<'_> {}

impl FusedIterator for ChunkHashes<'_> {}
