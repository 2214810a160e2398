//! RAG pipeline orchestrator.
//!
//! [`RagPipeline`] coordinates the two-phase workflow: a batch `process`
//! (load → split → embed → index → suggest) followed by any number of
//! `query` calls against the built index. Indexing is strictly
//! batch-then-query: a question asked before a successful `process` is
//! rejected rather than served against a partial index.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brainwave_rag::{RagConfig, RagPipeline, Session, Source};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(embeddings))
//!     .chat_model(Arc::new(chat))
//!     .build()?;
//!
//! let mut session = Session::new();
//! pipeline.process(&mut session, &sources).await?;
//! let answer = pipeline.query(&session, "What is this about?").await?;
//! ```

use std::sync::Arc;

use brainwave_model::{ChatModel, EmbeddingProvider, ModelError};
use tracing::{error, info};

use crate::answerer::Answerer;
use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;
use crate::loader::{self, Source, SourceIssue};
use crate::session::Session;
use crate::splitter::{RecursiveSplitter, Splitter};
use crate::suggest::SuggestionGenerator;

/// The outcome of one successful processing run.
#[derive(Debug)]
pub struct ProcessReport {
    /// Number of documents produced by the loaders.
    pub documents: usize,
    /// Number of chunks embedded and indexed.
    pub chunks: usize,
    /// Per-source failures that did not abort the batch.
    pub issues: Vec<SourceIssue>,
}

/// The RAG pipeline orchestrator.
///
/// Composes an [`EmbeddingProvider`] and a [`ChatModel`] with the loader,
/// splitter, and index. Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embeddings: Arc<dyn EmbeddingProvider>,
    answerer: Answerer,
    suggester: SuggestionGenerator,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Ingest a batch of sources and replace the session's index.
    ///
    /// Loads every source (per-source failures are collected in the
    /// report, not fatal), splits the documents into overlapping chunks,
    /// embeds them in one batch, builds a fresh index, and generates
    /// suggested questions from the aggregated text.
    ///
    /// The session is updated only once the new index is fully built; on
    /// any earlier failure the previous index, ingested text, and
    /// suggestions all remain intact. The index is committed before the
    /// suggestion call, so a suggestion failure surfaces as an error while
    /// the freshly built index stays queryable.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyInput`] if no source produced any content
    /// - [`RagError::Config`] if the chunking parameters are invalid
    /// - [`RagError::Embedding`] if the embedding service call fails
    /// - [`RagError::LanguageModel`] if suggestion generation fails
    pub async fn process(
        &self,
        session: &mut Session,
        sources: &[Source],
    ) -> Result<ProcessReport> {
        let splitter = RecursiveSplitter::new(self.config.chunk_size, self.config.chunk_overlap)?;

        let load_report = loader::load_batch(sources).await;
        if load_report.documents.is_empty() {
            return Err(RagError::EmptyInput);
        }
        let document_count = load_report.documents.len();

        let mut aggregated = String::new();
        for document in &load_report.documents {
            aggregated.push_str(&document.text);
            aggregated.push('\n');
        }

        let chunks = splitter.split_documents(&load_report.documents);
        if chunks.is_empty() {
            return Err(RagError::EmptyInput);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embeddings.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during processing");
            RagError::Embedding(e)
        })?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding(ModelError::Service {
                provider: "embedding".to_string(),
                message: format!(
                    "expected {} vectors, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            }));
        }

        let chunk_count = chunks.len();
        let pairs: Vec<_> = embeddings.into_iter().zip(chunks).collect();
        let index = VectorIndex::build(pairs)?;

        info!(
            documents = document_count,
            chunks = chunk_count,
            issues = load_report.issues.len(),
            "processed sources"
        );

        session.index = Some(Arc::new(index));
        session.ingested_text = aggregated;

        let suggestions = self
            .suggester
            .suggest(&session.ingested_text, self.config.suggestion_max_chars)
            .await?;
        session.suggested_questions = Some(suggestions);

        Ok(ProcessReport {
            documents: document_count,
            chunks: chunk_count,
            issues: load_report.issues,
        })
    }

    /// Answer a question against the session's current index.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyIndex`] if no index has been built yet
    /// - [`RagError::Embedding`] / [`RagError::LanguageModel`] for remote
    ///   failures, never retried internally
    pub async fn query(&self, session: &Session, question: &str) -> Result<String> {
        let index = session.index.as_ref().ok_or(RagError::EmptyIndex)?;
        self.answerer.answer(index, question, self.config.top_k).await
    }

    /// Regenerate suggested questions for the session's ingested text.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyIndex`] if nothing has been ingested yet
    /// - [`RagError::LanguageModel`] on remote failure
    pub async fn suggest(&self, session: &mut Session) -> Result<String> {
        if !session.has_index() {
            return Err(RagError::EmptyIndex);
        }
        let suggestions = self
            .suggester
            .suggest(&session.ingested_text, self.config.suggestion_max_chars)
            .await?;
        session.suggested_questions = Some(suggestions.clone());
        Ok(suggestions)
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embeddings: Option<Arc<dyn EmbeddingProvider>>,
    chat: Option<Arc<dyn ChatModel>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embeddings = Some(provider);
        self
    }

    /// Set the chat model used for synthesis and suggestions.
    pub fn chat_model(mut self, chat: Arc<dyn ChatModel>) -> Self {
        self.chat = Some(chat);
        self
    }

    /// Build the [`RagPipeline`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embeddings = self
            .embeddings
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let chat =
            self.chat.ok_or_else(|| RagError::Config("chat_model is required".to_string()))?;

        let answerer = Answerer::new(embeddings.clone(), chat.clone());
        let suggester = SuggestionGenerator::new(chat);

        Ok(RagPipeline { config, embeddings, answerer, suggester })
    }
}

#[cfg(test)]
mod tests {
    use brainwave_model::{MockChat, MockEmbeddings};

    use super::*;

    #[test]
    fn builder_requires_every_field() {
        assert!(matches!(RagPipeline::builder().build(), Err(RagError::Config(_))));

        let missing_chat = RagPipeline::builder()
            .config(RagConfig::default())
            .embedding_provider(Arc::new(MockEmbeddings::new(8)))
            .build();
        assert!(matches!(missing_chat, Err(RagError::Config(_))));

        let complete = RagPipeline::builder()
            .config(RagConfig::default())
            .embedding_provider(Arc::new(MockEmbeddings::new(8)))
            .chat_model(Arc::new(MockChat::new("ok")))
            .build();
        assert!(complete.is_ok());
    }
}
