//! JSON loading: the parsed value pretty-printed as one document.

use std::path::Path;

use crate::document::Document;
use crate::error::{RagError, Result};

pub(super) async fn load(path: &Path) -> Result<Vec<Document>> {
    let source = path.display().to_string();
    let load_err =
        |message: String| RagError::Load { uri: source.clone(), message };

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| load_err(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| load_err(e.to_string()))?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| load_err(e.to_string()))?;

    Ok(vec![Document::new(text, source)])
}
