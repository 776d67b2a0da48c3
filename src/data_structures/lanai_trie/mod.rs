// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Hash Trie for longest-prefix endpoint matching.
//!
//! The trie answers "which currently available endpoints have already seen the
//! longest leading part of this request". Requests are cut into fixed-size
//! byte chunks, each chunk is hashed to a 64-bit key, and the keys spell a
//! path from the root. Every node remembers the endpoints whose requests passed
//! through it.
//!
//! # Concurrency
//!
//! Each node carries its own async mutex; there is no global lock. Inserts
//! hold a node's guard only for that node's own update and never while
//! descending. Lookups come in two flavours selected by [`LockStrategy`]:
//!
//! - [`LockStrategy::Coarse`] keeps the parent's guard for the whole step:
//!   child lookup, read of the child's endpoints, intersection.
//! - [`LockStrategy::Fine`] takes a guard just to fetch the child, then just to
//!   copy the child's endpoints, and intersects with no guard held.
//!
//! Guards are scoped, so a lookup or insert future that is dropped mid-walk
//! releases whatever guard it holds. Lookups are not snapshot isolated: a walk
//! racing with inserts may see some nodes before and others after an insert.
//!
//! Keys are trusted as path identity. Two different chunks that collide on
//! the 64-bit hash share a node; the raw bytes are not kept to tell them apart.
//!
//! # Example
//!
//! ```
//! use mauka_lpm_lib::data_structures::lanai_trie::{EndpointSet, LanaiTrie, LockStrategy};
//!
//! # tokio_test::block_on(async {
//! let trie = LanaiTrie::new(4).unwrap();
//! trie.insert("abcdefgh", "endpoint_0").await;
//! trie.insert("abcdwxyz", "endpoint_1").await;
//!
//! let available: EndpointSet = ["endpoint_0", "endpoint_1"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let result = trie
//!     .longest_prefix_match("abcdefgh-tail", &available, LockStrategy::Fine)
//!     .await;
//! assert_eq!(result.matched_length, 8);
//! assert!(result.endpoints.contains("endpoint_0"));
//! # });
//! ```

mod chunk;
mod config;
mod error;
mod matching;
mod node;

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, trace};

pub use chunk::{chunk_count, chunk_hash, ChunkHashes};
pub use self::config::{LanaiTrieConfig, LockStrategy, DEFAULT_CHUNK_SIZE};
pub use error::LanaiTrieError;
pub use matching::PrefixMatch;
use matching::{intersect, PrefixWalk};
use node::TrieNode;

/// Set of endpoint identifiers.
pub type EndpointSet = hashbrown::HashSet<String>;

/// Result type for Lanai Trie operations
pub type LanaiTrieResult<T> = Result<T, LanaiTrieError>;

/// Concurrent chunk-hashed prefix trie.
///
/// The trie is insert-only: nodes and endpoint memberships are never removed
/// for the lifetime of the value.
#[derive(Debug)]
pub struct LanaiTrie {
    /// Sentinel node; its endpoint set holds every endpoint ever inserted
    root: Arc<TrieNode>,

    /// Chunk size in bytes
    chunk_size: NonZeroUsize,

    /// Strategy used by [`LanaiTrie::match_default`]
    lock_strategy: LockStrategy,
}

impl LanaiTrie {
    /// Creates an empty trie that cuts requests into `chunk_size`-byte chunks.
    ///
    /// # Errors
    ///
    /// Returns [`LanaiTrieError::InvalidConfiguration`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> LanaiTrieResult<Self> {
        Self::with_config(LanaiTrieConfig::new().with_chunk_size(chunk_size))
    }

    /// Creates an empty trie from a signed chunk size, rejecting zero and
    /// negative values.
    pub fn from_signed(chunk_size: i64) -> LanaiTrieResult<Self> {
        let chunk_size = usize::try_from(chunk_size).map_err(|_| {
            LanaiTrieError::InvalidConfiguration(format!(
                "chunk_size must be a positive integer, got {chunk_size}"
            ))
        })?;
        Self::new(chunk_size)
    }

    /// Creates an empty trie with the specified configuration.
    pub fn with_config(config: LanaiTrieConfig) -> LanaiTrieResult<Self> {
        let chunk_size = config.validated_chunk_size()?;
        debug!(
            chunk_size = chunk_size.get(),
            lock_strategy = %config.get_lock_strategy(),
            "Created Lanai trie"
        );
        Ok(Self {
            root: Arc::new(TrieNode::new()),
            chunk_size,
            lock_strategy: config.get_lock_strategy(),
        })
    }

    /// Chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    /// Strategy used by [`LanaiTrie::match_default`].
    pub fn lock_strategy(&self) -> LockStrategy {
        self.lock_strategy
    }

    /// Key sequence for `request` under this trie's chunk size.
    pub fn chunk_hashes<'a>(&self, request: &'a str) -> ChunkHashes<'a> {
        ChunkHashes::new(request, self.chunk_size)
    }

    /// Records that `endpoint` has served `request`.
    ///
    /// The endpoint is added to the root and to every node on the request's
    /// chunk path, creating missing nodes on the way. Inserting the same pair
    /// twice leaves the trie unchanged.
    pub async fn insert(&self, request: &str, endpoint: &str) {
        let mut node = Arc::clone(&self.root);
        node.add_endpoint(endpoint).await;

        for (depth, hash) in self.chunk_hashes(request).enumerate() {
            let (child, created) = node.child_or_insert(hash).await;
            if created {
                debug!(depth, hash, endpoint, "Created trie node");
            }
            node = child;
            node.add_endpoint(endpoint).await;
        }
    }

    /// Longest prefix match using the given lock strategy.
    pub async fn longest_prefix_match(
        &self,
        request: &str,
        available: &EndpointSet,
        strategy: LockStrategy,
    ) -> PrefixMatch {
        match strategy {
            LockStrategy::Coarse => self.match_coarse(request, available).await,
            LockStrategy::Fine => self.match_fine(request, available).await,
        }
    }

    /// Longest prefix match using the configured lock strategy.
    pub async fn match_default(&self, request: &str, available: &EndpointSet) -> PrefixMatch {
        self.longest_prefix_match(request, available, self.lock_strategy)
            .await
    }

    /// Longest prefix match holding the current node's guard for the whole
    /// step.
    ///
    /// The parent's guard stays held while the child's endpoints are read
    /// (under the child's own guard) and intersected with the running
    /// selection, and is released only once the walk has decided whether to
    /// descend. Guards are always taken parent before child.
    pub async fn match_coarse(&self, request: &str, available: &EndpointSet) -> PrefixMatch {
        let mut walk = PrefixWalk::new(available, self.chunk_size.get(), request.len());
        let mut node = Arc::clone(&self.root);

        for hash in self.chunk_hashes(request) {
            if walk.selection().is_empty() {
                break;
            }

            let parent = node.lock().await;
            let Some(child) = parent.children.get(&hash).cloned() else {
                trace!(depth = walk.matched_chunks(), "No child for chunk");
                break;
            };

            let narrowed = {
                let child_state = child.lock().await;
                intersect(&child_state.endpoints, walk.selection())
            };
            if narrowed.is_empty() {
                trace!(depth = walk.matched_chunks(), "No available endpoint past this chunk");
                break;
            }

            walk.advance(narrowed);
            drop(parent);
            node = child;
        }

        walk.finish()
    }

    /// Longest prefix match with minimal critical sections.
    ///
    /// The current node's guard covers only the child lookup and the child's
    /// guard covers only the copy of its endpoints. The intersection runs on
    /// the copy with no guard held, so it may be stale against a concurrent
    /// insert.
    pub async fn match_fine(&self, request: &str, available: &EndpointSet) -> PrefixMatch {
        let mut walk = PrefixWalk::new(available, self.chunk_size.get(), request.len());
        let mut node = Arc::clone(&self.root);

        for hash in self.chunk_hashes(request) {
            if walk.selection().is_empty() {
                break;
            }

            let Some(child) = node.child(hash).await else {
                trace!(depth = walk.matched_chunks(), "No child for chunk");
                break;
            };

            let snapshot = child.endpoints_snapshot().await;
            let narrowed = intersect(&snapshot, walk.selection());
            if narrowed.is_empty() {
                trace!(depth = walk.matched_chunks(), "No available endpoint past this chunk");
                break;
            }

            walk.advance(narrowed);
            node = child;
        }

        walk.finish()
    }

    /// Endpoints recorded at the node reached by the exact chunk path of
    /// `prefix`, or `None` if that path does not exist. The empty prefix
    /// addresses the root.
    pub async fn endpoints_at(&self, prefix: &str) -> Option<EndpointSet> {
        let mut node = Arc::clone(&self.root);
        for hash in self.chunk_hashes(prefix) {
            node = node.child(hash).await?;
        }
        Some(node.endpoints_snapshot().await)
    }

    /// Every endpoint ever inserted.
    pub async fn root_endpoints(&self) -> EndpointSet {
        self.root.endpoints_snapshot().await
    }

    /// Number of nodes, root included.
    ///
    /// Walks the tree taking one guard at a time, so the count is only exact
    /// when no insert is running.
    pub async fn node_count(&self) -> usize {
        let mut pending = vec![Arc::clone(&self.root)];
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children_snapshot().await);
        }
        count
    }
}
