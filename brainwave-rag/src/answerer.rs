//! Retrieval-augmented answering.
//!
//! [`Answerer`] turns a question into a grounded answer: embed the
//! question, retrieve the top-k chunks from a [`VectorIndex`], concatenate
//! their text most-relevant-first into a context block, and submit one
//! synthesis request instructing the model to answer from that context
//! only ("stuff" composition). This holds as long as `k * chunk_size`
//! stays within the model's input budget — an explicit scaling limit of
//! the design, not a bug.

use std::sync::Arc;

use brainwave_model::{ChatModel, EmbeddingProvider};
use tracing::{debug, info};

use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Instruction framing that constrains the model to the retrieved context.
const ANSWER_PROMPT: &str = "Use the following pieces of context to answer the question at \
                             the end. If you don't know the answer, just say that you don't \
                             know, don't try to make up an answer.";

/// Composes retrieval and synthesis into a single `answer` operation.
pub struct Answerer {
    embeddings: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatModel>,
}

impl Answerer {
    /// Create an answerer from an embedding provider and a chat model.
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>, chat: Arc<dyn ChatModel>) -> Self {
        Self { embeddings, chat }
    }

    /// Answer `question` from the `k` most relevant chunks in `index`.
    ///
    /// Returns the model's raw text response.
    ///
    /// # Errors
    ///
    /// - [`RagError::InvalidArgument`] if `k == 0`
    /// - [`RagError::Embedding`] if embedding the question fails
    /// - [`RagError::LanguageModel`] if the synthesis call fails; the call
    ///   is not retried internally
    pub async fn answer(&self, index: &VectorIndex, question: &str, k: usize) -> Result<String> {
        let query = self.embeddings.embed(question).await.map_err(RagError::Embedding)?;
        let results = index.search(&query, k)?;

        debug!(retrieved = results.len(), "retrieved context chunks");

        let context =
            results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");
        let prompt =
            format!("{ANSWER_PROMPT}\n\n{context}\n\nQuestion: {question}\nHelpful Answer:");

        let answer = self.chat.complete(&prompt).await.map_err(RagError::LanguageModel)?;
        info!(question_len = question.len(), answer_len = answer.len(), "answered question");
        Ok(answer)
    }
}
