//! # brainwave-rag
//!
//! Retrieval-augmented question answering over heterogeneous sources.
//!
//! ## Overview
//!
//! The pipeline ingests documents, web pages, and source files into a
//! searchable in-memory semantic index, then answers natural-language
//! questions by retrieving relevant passages and asking a language model
//! to synthesize an answer grounded in them:
//!
//! - [`loader`] — files and URLs into normalized [`Document`]s
//! - [`RecursiveSplitter`] — documents into overlapping [`Chunk`]s
//! - [`VectorIndex`] — exact nearest-neighbor retrieval by cosine similarity
//! - [`Answerer`] — retrieve-then-synthesize question answering
//! - [`SuggestionGenerator`] — candidate questions from ingested content
//! - [`RagPipeline`] — the orchestrated `process` / `query` operations
//!
//! Processing is strictly batch-then-query: the whole batch is loaded,
//! split, embedded, and indexed before any question is served, and a
//! rebuild replaces the previous index wholesale.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brainwave_model::{OpenAiChat, OpenAiEmbeddings};
//! use brainwave_rag::{RagConfig, RagPipeline, Session, Source};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(OpenAiEmbeddings::new(api_key.clone())?))
//!     .chat_model(Arc::new(OpenAiChat::new(api_key)?))
//!     .build()?;
//!
//! let mut session = Session::new();
//! let report = pipeline
//!     .process(&mut session, &[Source::File("notes.pdf".into())])
//!     .await?;
//! println!("indexed {} chunks", report.chunks);
//!
//! let answer = pipeline.query(&session, "What are the key findings?").await?;
//! ```

pub mod answerer;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod session;
pub mod splitter;
pub mod suggest;

pub use answerer::Answerer;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult};
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use loader::{LoadReport, Source, SourceFormat, SourceIssue};
pub use pipeline::{ProcessReport, RagPipeline, RagPipelineBuilder};
pub use session::Session;
pub use splitter::{RecursiveSplitter, Splitter};
pub use suggest::SuggestionGenerator;
