//! CSV loading: one document per row, `header: value` lines as text.

use std::path::Path;

use crate::document::{Document, META_ROW};
use crate::error::{RagError, Result};

pub(super) async fn load(path: &Path) -> Result<Vec<Document>> {
    let source = path.display().to_string();
    let load_err =
        |message: String| RagError::Load { uri: source.clone(), message };

    let bytes = tokio::fs::read(path).await.map_err(|e| load_err(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes.as_slice());
    let headers = reader.headers().map_err(|e| load_err(e.to_string()))?.clone();

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| load_err(e.to_string()))?;
        let text = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{header}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut document = Document::new(text, source.clone());
        document.metadata.insert(META_ROW.to_string(), row.to_string());
        documents.push(document);
    }

    Ok(documents)
}
