//! In-memory vector index using cosine similarity.
//!
//! [`VectorIndex`] is built once from a batch of `(embedding, chunk)` pairs
//! and is read-only afterwards: `search` takes `&self` and performs an
//! exact scan, so concurrent searches against the same index are safe. A
//! new processing run builds a fresh index and replaces the old one
//! wholesale; there is no incremental delete or merge.

use tracing::debug;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// An immutable nearest-neighbor index over embedded chunks.
///
/// Entries keep their insertion order, which doubles as the tie-breaker
/// for equal scores: identical inputs against identical contents always
/// produce identical output order.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<(Vec<f32>, Chunk)>,
}

impl VectorIndex {
    /// Build an index from `(embedding, chunk)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyInput`] if `pairs` is empty — there would
    /// be nothing to query.
    pub fn build(pairs: Vec<(Vec<f32>, Chunk)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(RagError::EmptyInput);
        }
        debug!(entries = pairs.len(), "built vector index");
        Ok(Self { entries: pairs })
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries. Always false for a built index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `k` chunks nearest to `query` by cosine similarity,
    /// nearest first. If the index holds fewer than `k` entries, all of
    /// them are returned, ordered.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if `k == 0`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::InvalidArgument("k must be greater than zero".to_string()));
        }

        let mut scored: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(embedding, chunk)| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(embedding, query),
            })
            .collect();

        // Stable sort: ties keep insertion order, so results are
        // deterministic for identical index contents.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}
