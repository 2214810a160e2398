//! End-to-end pipeline scenarios with deterministic mock providers.

use std::sync::Arc;

use brainwave_model::{FailureMode, MockChat, MockEmbeddings, ModelError};
use brainwave_rag::{RagConfig, RagError, RagPipeline, Session, Source};
use tempfile::TempDir;

const DIM: usize = 32;

fn pipeline_with(chat: Arc<MockChat>, config: RagConfig) -> RagPipeline {
    RagPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(MockEmbeddings::new(DIM)))
        .chat_model(chat)
        .build()
        .unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> Source {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    Source::File(path)
}

#[tokio::test]
async fn twelve_thousand_char_document_yields_three_chunks() {
    let dir = TempDir::new().unwrap();
    // No split boundaries, so chunking is purely size-driven.
    let source = write_file(&dir, "big.txt", &"abcdefghij".repeat(1200));

    let chat = Arc::new(MockChat::new("1. What is this?"));
    let config = RagConfig::builder().chunk_size(5000).chunk_overlap(200).build().unwrap();
    let pipeline = pipeline_with(chat, config);

    let mut session = Session::new();
    let report = pipeline.process(&mut session, &[source]).await.unwrap();

    assert_eq!(report.documents, 1);
    assert_eq!(report.chunks, 3);
    assert!(report.issues.is_empty());
    assert!(session.has_index());
    assert_eq!(session.index().unwrap().len(), 3);
}

#[tokio::test]
async fn processing_zero_documents_fails_and_leaves_no_index() {
    let chat = Arc::new(MockChat::new("n/a"));
    let pipeline = pipeline_with(chat, RagConfig::default());

    let mut session = Session::new();
    let err = pipeline.process(&mut session, &[]).await.unwrap_err();

    assert!(matches!(err, RagError::EmptyInput));
    assert!(!session.has_index());
    assert!(session.suggested_questions().is_none());
}

#[tokio::test]
async fn all_sources_unsupported_is_empty_input() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "blob.bin", "opaque");

    let pipeline = pipeline_with(Arc::new(MockChat::new("n/a")), RagConfig::default());
    let mut session = Session::new();
    let err = pipeline.process(&mut session, &[source]).await.unwrap_err();

    assert!(matches!(err, RagError::EmptyInput));
    assert!(!session.has_index());
}

#[tokio::test]
async fn unsupported_source_is_reported_without_aborting_batch() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "notes.txt", "The reactor output is 42 megawatts.");
    let bad = write_file(&dir, "image.png", "not really a png");

    let pipeline = pipeline_with(Arc::new(MockChat::new("1. Q?")), RagConfig::default());
    let mut session = Session::new();
    let report = pipeline.process(&mut session, &[bad, good]).await.unwrap();

    assert_eq!(report.documents, 1);
    assert_eq!(report.issues.len(), 1);
    assert!(matches!(report.issues[0].error, RagError::UnsupportedFormat(_)));
    assert!(session.has_index());
}

#[tokio::test]
async fn search_over_ten_chunks_returns_top_three_deterministically() {
    let dir = TempDir::new().unwrap();
    // Ten paragraphs, each its own chunk at this size.
    let text: String = (0..10)
        .map(|i| format!("Paragraph number {i} talks about topic {i} at length.\n\n"))
        .collect();
    let source = write_file(&dir, "corpus.txt", &text);

    let chat = Arc::new(MockChat::new("answer"));
    let config = RagConfig::builder().chunk_size(80).chunk_overlap(0).top_k(3).build().unwrap();
    let pipeline = pipeline_with(chat.clone(), config);

    let mut session = Session::new();
    let report = pipeline.process(&mut session, &[source]).await.unwrap();
    assert_eq!(report.chunks, 10);

    pipeline.query(&session, "topic 4").await.unwrap();
    let first_prompt = chat.last_prompt().unwrap();

    pipeline.query(&session, "topic 4").await.unwrap();
    let second_prompt = chat.last_prompt().unwrap();

    // Identical index contents and question always build the identical
    // context block.
    assert_eq!(first_prompt, second_prompt);

    let embeddings = MockEmbeddings::new(DIM);
    use brainwave_model::EmbeddingProvider;
    let query = embeddings.embed("topic 4").await.unwrap();
    let results = session.index().unwrap().search(&query, 3).unwrap();
    assert_eq!(results.len(), 3);
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn query_before_processing_is_empty_index() {
    let pipeline = pipeline_with(Arc::new(MockChat::new("n/a")), RagConfig::default());
    let session = Session::new();

    let err = pipeline.query(&session, "anything there?").await.unwrap_err();
    assert!(matches!(err, RagError::EmptyIndex));
}

#[tokio::test]
async fn embedding_auth_failure_keeps_previous_index_queryable() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "notes.txt", "The launch window opens at dawn.");

    let good = pipeline_with(Arc::new(MockChat::new("At dawn.")), RagConfig::default());
    let mut session = Session::new();
    good.process(&mut session, &[source.clone()]).await.unwrap();
    let old_index = Arc::clone(session.index().unwrap());

    // Second pipeline simulates a rotated-out credential.
    let broken = RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(MockEmbeddings::failing(DIM, FailureMode::Auth)))
        .chat_model(Arc::new(MockChat::new("unreachable")))
        .build()
        .unwrap();

    let err = broken.process(&mut session, &[source]).await.unwrap_err();
    assert!(matches!(err, RagError::Embedding(ModelError::Auth { .. })));

    // The failed rebuild must not have touched the session.
    assert!(Arc::ptr_eq(session.index().unwrap(), &old_index));
    let answer = good.query(&session, "When does the launch window open?").await.unwrap();
    assert_eq!(answer, "At dawn.");
}

#[tokio::test]
async fn chat_failure_on_query_is_typed_not_empty() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "notes.txt", "Some indexed content.");

    let good = pipeline_with(Arc::new(MockChat::new("1. Q?")), RagConfig::default());
    let mut session = Session::new();
    good.process(&mut session, &[source]).await.unwrap();

    let broken = RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(MockEmbeddings::new(DIM)))
        .chat_model(Arc::new(MockChat::failing(FailureMode::Auth)))
        .build()
        .unwrap();

    let err = broken.query(&session, "question").await.unwrap_err();
    assert!(matches!(err, RagError::LanguageModel(ModelError::Auth { .. })));
    assert!(session.has_index());
}

#[tokio::test]
async fn suggestions_are_stored_in_session() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "notes.txt", "Quarterly revenue grew by twelve percent.");

    let chat = Arc::new(MockChat::new("1. How much did revenue grow?"));
    let pipeline = pipeline_with(chat.clone(), RagConfig::default());

    let mut session = Session::new();
    pipeline.process(&mut session, &[source]).await.unwrap();

    assert_eq!(session.suggested_questions(), Some("1. How much did revenue grow?"));
    let prompt = chat.last_prompt().unwrap();
    assert!(prompt.contains("suggest 5 helpful questions"));
    assert!(prompt.contains("Quarterly revenue grew"));
}

#[tokio::test]
async fn suggestion_failure_still_commits_the_index() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "notes.txt", "Indexed but unsuggested.");

    let pipeline = RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(MockEmbeddings::new(DIM)))
        .chat_model(Arc::new(MockChat::failing(FailureMode::RateLimit)))
        .build()
        .unwrap();

    let mut session = Session::new();
    let err = pipeline.process(&mut session, &[source]).await.unwrap_err();

    assert!(matches!(err, RagError::LanguageModel(ModelError::RateLimit { .. })));
    assert!(session.has_index());
    assert!(session.suggested_questions().is_none());
}

#[tokio::test]
async fn invalid_chunk_parameters_abort_before_loading() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "notes.txt", "content");

    let config = RagConfig { chunk_size: 100, chunk_overlap: 100, ..RagConfig::default() };
    let pipeline = pipeline_with(Arc::new(MockChat::new("n/a")), config);

    let mut session = Session::new();
    let err = pipeline.process(&mut session, &[source]).await.unwrap_err();
    assert!(matches!(err, RagError::Config(_)));
    assert!(!session.has_index());
}
