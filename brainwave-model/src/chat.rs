//! Chat model trait for single-shot text synthesis.

use async_trait::async_trait;

use crate::error::Result;

/// A language model that completes a single prompt into free text.
///
/// The pipeline only ever issues one-shot synthesis requests (answer a
/// question from supplied context, or propose candidate questions), so the
/// interface is a single prompt in, raw model text out. Generation
/// parameters such as temperature belong to the implementation and are set
/// at construction time.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit a prompt and return the model's raw text response.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`](crate::ModelError) on any remote failure.
    /// Calls are never retried internally.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
