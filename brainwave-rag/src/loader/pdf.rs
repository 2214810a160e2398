//! PDF loading via `pdf-extract`.

use std::path::Path;

use crate::document::Document;
use crate::error::{RagError, Result};

pub(super) async fn load(path: &Path) -> Result<Vec<Document>> {
    let source = path.display().to_string();
    let path = path.to_path_buf();

    // Text extraction is CPU-bound, keep it off the async executor.
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text(&path).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| RagError::Load { uri: source.clone(), message: e.to_string() })?;

    let text =
        extracted.map_err(|message| RagError::Load { uri: source.clone(), message })?;

    Ok(vec![Document::new(text, source)])
}
