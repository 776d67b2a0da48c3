//! Node implementation for the Lanai Hash Trie.
//!
//! Each node owns a single async mutex guarding both its child table and its
//! endpoint set. Helpers here never hold a node's guard while waiting on
//! another node's guard; callers that need that (the coarse lookup) do it
//! explicitly.

use std::sync::Arc;

use hashbrown::HashMap;
use tokio::sync::{Mutex, MutexGuard};

use super::EndpointSet;

/// State protected by a node's guard.
#[derive(Debug, Default)]
pub(crate) struct NodeState {
    /// Child nodes keyed by chunk hash
    pub children: HashMap<u64, Arc<TrieNode>>,

    /// Endpoints that inserted a request reaching this node
    pub endpoints: EndpointSet,
}

/// A vertex of the trie, addressed by the chunk-hash path from the root.
#[derive(Debug, Default)]
pub(crate) struct TrieNode {
    state: Mutex<NodeState>,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires this node's guard.
    pub async fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().await
    }

    /// Records `endpoint` at this node. Returns `true` if it was not present yet.
    pub async fn add_endpoint(&self, endpoint: &str) -> bool {
        let mut state = self.lock().await;
        if state.endpoints.contains(endpoint) {
            return false;
        }
        state.endpoints.insert(endpoint.to_owned())
    }

    /// Returns the child keyed by `hash`, creating it if this is the first
    /// traversal of that edge. The flag is `true` when a node was created.
    pub async fn child_or_insert(&self, hash: u64) -> (Arc<TrieNode>, bool) {
        let mut state = self.lock().await;
        let mut created = false;
        let child = state.children.entry(hash).or_insert_with(|| {
            created = true;
            Arc::new(TrieNode::new())
        });
        (Arc::clone(child), created)
    }

    /// Returns the child keyed by `hash`, if any.
    pub async fn child(&self, hash: u64) -> Option<Arc<TrieNode>> {
        self.lock().await.children.get(&hash).cloned()
    }

    /// Copies the endpoint set out from under the guard.
    pub async fn endpoints_snapshot(&self) -> EndpointSet {
        self.lock().await.endpoints.clone()
    }

    /// Whether the guard is currently held by someone.
    #[cfg(test)]
    pub fn state_is_locked(&self) -> bool {
        self.state.try_lock().is_err()
    }

    /// Copies the child references out from under the guard.
    pub async fn children_snapshot(&self) -> Vec<Arc<TrieNode>> {
        self.lock().await.children.values().cloned().collect()
    }
}
