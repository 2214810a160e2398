//! Plain-text and source-code file loading.

use std::path::Path;

use crate::document::Document;
use crate::error::{RagError, Result};

pub(super) async fn load(path: &Path) -> Result<Vec<Document>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| RagError::Load {
        uri: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(vec![Document::new(text, path.display().to_string())])
}
