//! Source loading: raw files and URLs into normalized [`Document`]s.
//!
//! Dispatch is by declared type tag — the file extension, or the URL
//! source class — over a closed set of recognized formats. Unknown tags
//! and per-source load failures never abort a batch: the offending source
//! contributes zero documents and is reported in the [`LoadReport`].

mod csv;
mod docx;
mod json;
mod pdf;
mod text;
mod web;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::document::Document;
use crate::error::{RagError, Result};

/// File extensions treated as source code and loaded as plain text.
const CODE_EXTENSIONS: [&str; 12] =
    ["py", "js", "ts", "java", "cpp", "c", "h", "hpp", "rs", "go", "html", "css"];

/// The closed set of recognized source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// PDF document, loaded via text extraction.
    Pdf,
    /// Word document (`.docx`), loaded from its XML body.
    Word,
    /// Plain text or markdown.
    Text,
    /// CSV file, one document per row.
    Csv,
    /// JSON file, loaded as pretty-printed text.
    Json,
    /// Source code, treated as plain text.
    Code,
}

impl SourceFormat {
    /// Look up the format for a file extension.
    ///
    /// Returns `None` for extensions outside the recognized set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Word),
            "txt" | "md" | "markdown" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ if CODE_EXTENSIONS.contains(&ext.as_str()) => Some(Self::Code),
            _ => None,
        }
    }
}

/// A raw input source: a file on disk or a URL to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A local file, dispatched by extension.
    File(PathBuf),
    /// A web page, fetched and reduced to readable article text.
    Url(String),
}

impl Source {
    /// Human-readable identifier for error reporting (filename or URL).
    pub fn id(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

/// A per-source failure recorded during batch loading.
#[derive(Debug)]
pub struct SourceIssue {
    /// Identifier of the offending source.
    pub source: String,
    /// What went wrong for this source.
    pub error: RagError,
}

/// The outcome of loading a batch of sources.
///
/// Loading has partial-success semantics: `documents` holds everything
/// that loaded, `issues` records every source that did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// All documents produced by sources that loaded successfully.
    pub documents: Vec<Document>,
    /// Sources that were skipped (unsupported format) or failed to load.
    pub issues: Vec<SourceIssue>,
}

fn extension_of(path: &Path) -> Result<&str> {
    path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
        RagError::UnsupportedFormat(format!("'{}' has no file extension", path.display()))
    })
}

/// Load a single file into zero or more documents.
///
/// # Errors
///
/// Returns [`RagError::UnsupportedFormat`] when the extension is outside
/// the recognized set, or [`RagError::Load`] wrapping any I/O or parse
/// failure from the format handler.
pub async fn load_file(path: &Path) -> Result<Vec<Document>> {
    let ext = extension_of(path)?;
    let format = SourceFormat::from_extension(ext)
        .ok_or_else(|| RagError::UnsupportedFormat(ext.to_string()))?;

    match format {
        SourceFormat::Pdf => pdf::load(path).await,
        SourceFormat::Word => docx::load(path).await,
        SourceFormat::Text | SourceFormat::Code => text::load(path).await,
        SourceFormat::Csv => csv::load(path).await,
        SourceFormat::Json => json::load(path).await,
    }
}

/// Load a batch of sources with per-source error isolation.
///
/// Files are loaded one at a time; URL sources share a single HTTP client
/// and are fetched in one batched pass, one document per reachable page.
/// A failure loading one source never affects whether another is loaded.
pub async fn load_batch(sources: &[Source]) -> LoadReport {
    let mut report = LoadReport::default();
    let mut urls = Vec::new();

    for source in sources {
        match source {
            Source::File(path) => match load_file(path).await {
                Ok(documents) => {
                    info!(source = %path.display(), count = documents.len(), "loaded file");
                    report.documents.extend(documents);
                }
                Err(err @ RagError::UnsupportedFormat(_)) => {
                    warn!(source = %path.display(), %err, "skipping unsupported source");
                    report.issues.push(SourceIssue { source: source.id(), error: err });
                }
                Err(err) => {
                    error!(source = %path.display(), %err, "failed to load source");
                    report.issues.push(SourceIssue { source: source.id(), error: err });
                }
            },
            Source::Url(url) => urls.push(url.as_str()),
        }
    }

    if !urls.is_empty() {
        match web::client() {
            Ok(client) => {
                for url in urls {
                    match web::load_url(&client, url).await {
                        Ok(documents) => {
                            info!(source = url, count = documents.len(), "fetched url");
                            report.documents.extend(documents);
                        }
                        Err(err) => {
                            error!(source = url, %err, "failed to fetch url");
                            report
                                .issues
                                .push(SourceIssue { source: url.to_string(), error: err });
                        }
                    }
                }
            }
            Err(err) => {
                // Client construction failing dooms every URL in the batch,
                // but files already loaded are unaffected.
                error!(%err, "failed to build http client");
                for url in urls {
                    report.issues.push(SourceIssue {
                        source: url.to_string(),
                        error: RagError::Load {
                            uri: url.to_string(),
                            message: err.to_string(),
                        },
                    });
                }
            }
        }
    }

    report
}
