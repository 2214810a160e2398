//! # brainwave-model
//!
//! Remote model-service clients for the BrainWave RAG pipeline.
//!
//! ## Overview
//!
//! This crate provides the two network boundaries the pipeline depends on:
//!
//! - [`EmbeddingProvider`] — maps text to fixed-dimension vectors
//! - [`ChatModel`] — synthesizes free-text completions from a prompt
//!
//! Both traits are implemented against the OpenAI HTTP API
//! ([`OpenAiEmbeddings`], [`OpenAiChat`]) and by deterministic in-process
//! mocks ([`MockEmbeddings`], [`MockChat`]) for testing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brainwave_model::{OpenAiChat, OpenAiEmbeddings, ChatModel, EmbeddingProvider};
//!
//! let embeddings = OpenAiEmbeddings::new("sk-...")?;
//! let vector = embeddings.embed("hello world").await?;
//!
//! let chat = OpenAiChat::new("sk-...")?;
//! let reply = chat.complete("Say hello.").await?;
//! ```
//!
//! ## Error model
//!
//! Remote failures surface as [`ModelError`] with three distinguishable
//! kinds — authentication rejection, rate limiting, and everything else —
//! so callers can decide on retry/backoff policy. No call is retried here.

pub mod chat;
pub mod embedding;
pub mod error;
pub mod mock;
pub mod openai;

pub use chat::ChatModel;
pub use embedding::EmbeddingProvider;
pub use error::{ModelError, Result};
pub use mock::{FailureMode, MockChat, MockEmbeddings};
pub use openai::{OpenAiChat, OpenAiEmbeddings};
