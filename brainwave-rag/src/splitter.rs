//! Recursive text splitting with overlap.
//!
//! [`RecursiveSplitter`] partitions document text on the largest semantic
//! boundary available — paragraph break, then sentence or line break, then
//! word break, then raw character — so that no chunk exceeds the configured
//! size, then re-includes the trailing `chunk_overlap` characters of each
//! chunk at the head of the next one. Boundary-spanning context is never
//! fully lost, and stripping the overlap prefixes reconstructs the
//! original text exactly.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// Split boundaries tried in order, largest semantic unit first.
const SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s carrying the parent document's
/// metadata unchanged. Embeddings are attached later by the pipeline.
pub trait Splitter: Send + Sync {
    /// Split a single document into ordered chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn split(&self, document: &Document) -> Vec<Chunk>;

    /// Split a batch of documents, preserving document order.
    fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents.iter().flat_map(|doc| self.split(doc)).collect()
    }
}

/// Deterministic recursive character splitter.
///
/// Each produced chunk is at most `chunk_size` characters: the first
/// `chunk_overlap` characters of every chunk after the first repeat the
/// tail of the preceding text, and the remainder is fresh content of at
/// most `chunk_size - chunk_overlap` characters.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveSplitter {
    /// Create a new splitter.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_overlap >= chunk_size` or
    /// `chunk_size == 0`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The last `n` characters of `text` (whole string if shorter).
fn tail_chars(text: &str, n: usize) -> String {
    let total = char_len(text);
    text.chars().skip(total.saturating_sub(n)).collect()
}

/// Split text at a separator while keeping the separator attached to the
/// preceding segment, so concatenating the segments reproduces the input.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Raw character-level split into pieces of at most `budget` characters.
fn split_chars(text: &str, budget: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == budget {
            pieces.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Push `current` as a finished piece, recursing to the next separator
/// level if it still exceeds the budget.
fn flush(pieces: &mut Vec<String>, current: &mut String, budget: usize, separators: &[&str]) {
    let text = std::mem::take(current);
    if text.is_empty() {
        return;
    }
    if char_len(&text) > budget {
        pieces.extend(split_and_merge(&text, budget, separators));
    } else {
        pieces.push(text);
    }
}

/// Split text by the first separator, then greedily merge segments into
/// pieces that respect `budget`. Segments that exceed the budget on their
/// own are split further using the next-level separator. Greedy merging
/// picks the boundary producing the piece closest to (but not exceeding)
/// the budget.
fn split_and_merge(text: &str, budget: usize, separators: &[&str]) -> Vec<String> {
    if char_len(text) <= budget {
        return vec![text.to_string()];
    }
    if separators.is_empty() {
        return split_chars(text, budget);
    }

    let separator = separators[0];
    let remaining = &separators[1..];

    let segments = split_keeping_separator(text, separator);
    if segments.len() <= 1 {
        // Separator absent at this level, descend to the next one.
        return split_and_merge(text, budget, remaining);
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for segment in segments {
        let segment_len = char_len(segment);
        if current_len > 0 && current_len + segment_len > budget {
            flush(&mut pieces, &mut current, budget, remaining);
            current_len = 0;
        }
        current.push_str(segment);
        current_len += segment_len;
    }
    flush(&mut pieces, &mut current, budget, remaining);

    pieces
}

impl Splitter for RecursiveSplitter {
    fn split(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        // Fresh content per chunk is capped so that prepending the overlap
        // never pushes a chunk past chunk_size.
        let budget = self.chunk_size - self.chunk_overlap;
        let pieces = split_and_merge(&document.text, budget, &SEPARATORS);

        let mut chunks = Vec::with_capacity(pieces.len());
        let mut tail = String::new();

        for (chunk_index, piece) in pieces.into_iter().enumerate() {
            let joined = format!("{tail}{piece}");
            tail = tail_chars(&joined, self.chunk_overlap);
            chunks.push(Chunk {
                text: joined,
                metadata: document.metadata.clone(),
                chunk_index,
            });
        }

        chunks
    }
}
