//! Deterministic mock providers for testing.
//!
//! [`MockEmbeddings`] derives a repeatable vector from the input bytes, so
//! identical texts always embed identically and similar prefixes land near
//! each other. [`MockChat`] returns a canned reply and records the last
//! prompt it saw. Both can be configured to fail with a chosen error kind
//! to exercise failure paths without a network.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::chat::ChatModel;
use crate::embedding::EmbeddingProvider;
use crate::error::{ModelError, Result};

/// Which error kind a mock should produce when told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Fail with [`ModelError::Auth`].
    Auth,
    /// Fail with [`ModelError::RateLimit`].
    RateLimit,
    /// Fail with [`ModelError::Service`].
    Service,
}

impl FailureMode {
    fn into_error(self, provider: &str) -> ModelError {
        let provider = provider.to_string();
        match self {
            Self::Auth => ModelError::Auth { provider, message: "mock auth failure".into() },
            Self::RateLimit => {
                ModelError::RateLimit { provider, message: "mock rate limit".into() }
            }
            Self::Service => {
                ModelError::Service { provider, message: "mock service failure".into() }
            }
        }
    }
}

/// A deterministic, network-free [`EmbeddingProvider`].
///
/// Vectors are built from byte frequencies of the input and L2-normalized,
/// so equality of inputs implies equality of embeddings and a text is
/// always most similar to itself.
pub struct MockEmbeddings {
    dimensions: usize,
    failure: Option<FailureMode>,
}

impl MockEmbeddings {
    /// Create a mock producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, failure: None }
    }

    /// Make every call fail with the given error kind.
    pub fn failing(dimensions: usize, mode: FailureMode) -> Self {
        Self { dimensions, failure: Some(mode) }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for (i, b) in text.bytes().enumerate() {
            v[(i + b as usize) % self.dimensions] += 1.0;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            v[0] = 1.0;
        } else {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(mode) = self.failure {
            return Err(mode.into_error("MockEmbeddings"));
        }
        Ok(self.vector_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`ChatModel`] that returns a canned reply and records its last prompt.
pub struct MockChat {
    reply: String,
    failure: Option<FailureMode>,
    last_prompt: Mutex<Option<String>>,
}

impl MockChat {
    /// Create a mock that answers every prompt with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), failure: None, last_prompt: Mutex::new(None) }
    }

    /// Make every call fail with the given error kind.
    pub fn failing(mode: FailureMode) -> Self {
        Self { reply: String::new(), failure: Some(mode), last_prompt: Mutex::new(None) }
    }

    /// The most recent prompt passed to [`complete`](ChatModel::complete).
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Ok(mut guard) = self.last_prompt.lock() {
            *guard = Some(prompt.to_string());
        }
        if let Some(mode) = self.failure {
            return Err(mode.into_error("MockChat"));
        }
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_embedding_is_deterministic() {
        let mock = MockEmbeddings::new(16);
        let a = mock.embed("the quick brown fox").await.unwrap();
        let b = mock.embed("the quick brown fox").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[tokio::test]
    async fn mock_embedding_distinguishes_texts() {
        let mock = MockEmbeddings::new(16);
        let a = mock.embed("alpha").await.unwrap();
        let b = mock.embed("a completely different sentence").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn mock_embedding_empty_text_is_unit_vector() {
        let mock = MockEmbeddings::new(8);
        let v = mock.embed("").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn mock_chat_records_prompt() {
        let mock = MockChat::new("fine");
        let reply = mock.complete("how are you?").await.unwrap();
        assert_eq!(reply, "fine");
        assert_eq!(mock.last_prompt().as_deref(), Some("how are you?"));
    }

    #[tokio::test]
    async fn failure_modes_map_to_error_kinds() {
        let auth = MockEmbeddings::failing(4, FailureMode::Auth);
        assert!(matches!(auth.embed("x").await, Err(ModelError::Auth { .. })));

        let throttled = MockChat::failing(FailureMode::RateLimit);
        assert!(matches!(throttled.complete("x").await, Err(ModelError::RateLimit { .. })));
    }
}
