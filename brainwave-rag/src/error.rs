//! Error types for the `brainwave-rag` crate.

use brainwave_model::ModelError;
use thiserror::Error;

/// Errors that can occur across the ingestion and query pipeline.
///
/// Per-source failures ([`UnsupportedFormat`](RagError::UnsupportedFormat),
/// [`Load`](RagError::Load)) are non-fatal to a batch: the batch layer
/// catches and reports them individually while continuing with the
/// remaining sources. Everything else aborts the current operation.
#[derive(Debug, Error)]
pub enum RagError {
    /// The source's declared type tag is not in the recognized set.
    ///
    /// Reported as a warning during batch ingestion; the offending source
    /// contributes zero documents.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A recognized source failed to load (I/O, parse, or fetch failure).
    #[error("failed to load '{uri}': {message}")]
    Load {
        /// Identifier of the offending source (filename or URL).
        uri: String,
        /// A description of the underlying failure.
        message: String,
    },

    /// Invalid configuration, fatal to the invocation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// There is nothing to index: no documents survived loading, or an
    /// index build was attempted with zero chunks.
    #[error("no content to index")]
    EmptyInput,

    /// A query was issued before any index was built.
    #[error("no index has been built yet")]
    EmptyIndex,

    /// A caller-supplied argument is out of range (e.g. `k == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The embedding service call failed.
    #[error("embedding service: {0}")]
    Embedding(#[source] ModelError),

    /// The language-model synthesis call failed.
    #[error("language model: {0}")]
    LanguageModel(#[source] ModelError),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
