//! Longest-prefix-match results.

use std::borrow::Cow;

use super::EndpointSet;

/// Outcome of a longest-prefix-match walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Number of leading chunks committed by the walk
    pub matched_chunks: usize,

    /// Number of request bytes covered by the committed chunks
    pub matched_length: usize,

    /// Available endpoints consistent with the whole matched prefix.
    /// Equals the caller's available set when no chunk matched.
    pub endpoints: EndpointSet,
}

impl PrefixMatch {
    /// Whether at least one chunk matched.
    pub fn is_match(&self) -> bool {
        self.matched_chunks > 0
    }
}

/// Running state of a walk.
///
/// The selection borrows the caller's available set until the first chunk
/// narrows it, so a lookup copies endpoints only for committed chunks or
/// when it has to hand back an unmatched selection.
#[derive(Debug)]
pub(crate) struct PrefixWalk<'a> {
    chunk_size: usize,
    request_len: usize,
    matched_chunks: usize,
    selection: Cow<'a, EndpointSet>,
}

impl<'a> PrefixWalk<'a> {
    /// A walk that has not committed any chunk yet.
    pub(crate) fn new(available: &'a EndpointSet, chunk_size: usize, request_len: usize) -> Self {
        Self {
            chunk_size,
            request_len,
            matched_chunks: 0,
            selection: Cow::Borrowed(available),
        }
    }

    /// Number of chunks committed so far.
    pub(crate) fn matched_chunks(&self) -> usize {
        self.matched_chunks
    }

    /// Endpoints consistent with every committed chunk.
    pub(crate) fn selection(&self) -> &EndpointSet {
        &self.selection
    }

    /// Commits one more chunk and narrows the selection.
    pub(crate) fn advance(&mut self, narrowed: EndpointSet) {
        self.matched_chunks += 1;
        self.selection = Cow::Owned(narrowed);
    }

    /// Ends the walk.
    pub(crate) fn finish(self) -> PrefixMatch {
        PrefixMatch {
            matched_chunks: self.matched_chunks,
            matched_length: (self.matched_chunks * self.chunk_size).min(self.request_len),
            endpoints: self.selection.into_owned(),
        }
    }
}

/// Intersects two endpoint sets, probing the larger with the smaller.
pub(crate) fn intersect(a: &EndpointSet, b: &EndpointSet) -> EndpointSet {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter(|endpoint| large.contains(endpoint.as_str()))
        .cloned()
        .collect()
}
