//! Transient per-caller pipeline state.

use std::sync::Arc;

use crate::index::VectorIndex;

/// State surviving between pipeline operations within one running
/// instance.
///
/// The session is owned by the caller (typically an interactive
/// front-end) and handed to each core operation; the pipeline updates it
/// only when an operation succeeds, so a failed rebuild leaves the
/// previous index intact and queryable. Nothing here is ever persisted.
///
/// The index is held behind an [`Arc`]: a query that cloned the handle
/// before a rebuild completes finishes against the old index and never
/// observes a half-built one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) index: Option<Arc<VectorIndex>>,
    pub(crate) ingested_text: String,
    pub(crate) suggested_questions: Option<String>,
}

impl Session {
    /// Create an empty session with no index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a vector index has been built in this session.
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// The current vector index, if one has been built.
    pub fn index(&self) -> Option<&Arc<VectorIndex>> {
        self.index.as_ref()
    }

    /// The concatenated text of everything ingested by the last
    /// successful processing run.
    pub fn ingested_text(&self) -> &str {
        &self.ingested_text
    }

    /// The suggested-questions text from the last successful run, if any.
    pub fn suggested_questions(&self) -> Option<&str> {
        self.suggested_questions.as_deref()
    }
}
