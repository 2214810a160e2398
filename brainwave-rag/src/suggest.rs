//! Suggested-question generation from ingested content.

use std::sync::Arc;

use brainwave_model::ChatModel;
use tracing::info;

use crate::error::{RagError, Result};

/// Asks the language model to propose candidate questions over a bounded
/// prefix of the aggregated ingested text.
///
/// The prompt requests exactly 5 numbered questions, but that is advisory
/// formatting on the model's side: the raw response is returned as-is and
/// never parsed or validated.
pub struct SuggestionGenerator {
    chat: Arc<dyn ChatModel>,
}

impl SuggestionGenerator {
    /// Create a generator backed by the given chat model.
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// Suggest questions for the first `max_chars` characters of
    /// `aggregated_text`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LanguageModel`] on any remote failure.
    pub async fn suggest(&self, aggregated_text: &str, max_chars: usize) -> Result<String> {
        let prefix: String = aggregated_text.chars().take(max_chars).collect();
        let prompt = format!(
            "You are an intelligent assistant. Based on the content below, suggest 5 \
             helpful questions a user might ask:\n\nContent:\n{prefix}\n\nQuestions:\n\
             1.\n2.\n3.\n4.\n5.\n"
        );

        let response = self.chat.complete(&prompt).await.map_err(RagError::LanguageModel)?;
        info!(prefix_len = prefix.len(), "generated suggested questions");
        Ok(response)
    }
}
