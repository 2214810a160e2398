//! Data types for documents, chunks, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key recording the source identifier (filename or URL).
pub const META_SOURCE: &str = "source";

/// Metadata key recording a row locator for tabular sources.
pub const META_ROW: &str = "row";

/// Metadata key recording a page title for web sources.
pub const META_TITLE: &str = "title";

/// A normalized source document: text content plus metadata.
///
/// Produced by a loader from one raw source and immutable once created.
/// Metadata records at minimum the source identifier and, where the format
/// provides one, a finer-grained locator (CSV row, page title).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with the given text and a `source` metadata entry.
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(META_SOURCE.to_string(), source.into());
        Self { text: text.into(), metadata }
    }

    /// The source identifier this document was loaded from, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).map(String::as_str)
    }
}

/// A bounded-size slice of a [`Document`]'s text, the unit of embedding
/// and retrieval.
///
/// Consecutive chunks from the same document share an overlap region so
/// that a sentence truncated at a chunk boundary is recoverable from the
/// adjacent chunk. `chunk_index` preserves insertion order within the
/// parent document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// Metadata inherited unchanged from the parent document.
    pub metadata: HashMap<String, String>,
    /// Position of this chunk within its parent document.
    pub chunk_index: usize,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
