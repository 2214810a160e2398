//! URL loading: fetch HTML and reduce it to readable article text.

use std::io::Cursor;
use std::time::Duration;

use crate::document::{Document, META_TITLE};
use crate::error::{RagError, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (compatible; BrainWave/0.1)";

/// Build the HTTP client shared by every URL in a batch.
pub(super) fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| RagError::Load {
            uri: "http client".to_string(),
            message: e.to_string(),
        })
}

/// Fetch one URL and extract its article content.
pub(super) async fn load_url(client: &reqwest::Client, url: &str) -> Result<Vec<Document>> {
    let load_err =
        |message: String| RagError::Load { uri: url.to_string(), message };

    let parsed =
        reqwest::Url::parse(url).map_err(|e| load_err(format!("invalid url: {e}")))?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| load_err(format!("fetch failed: {e}")))?;

    if !response.status().is_success() {
        return Err(load_err(format!("fetch returned {}", response.status())));
    }

    // Track the final URL after redirects; readability resolves relative
    // links against it.
    let final_url = response.url().clone();
    let bytes =
        response.bytes().await.map_err(|e| load_err(format!("read failed: {e}")))?;

    let mut cursor = Cursor::new(bytes.as_ref());
    let product = readability::extractor::extract(&mut cursor, &final_url)
        .map_err(|e| load_err(format!("content extraction failed: {e}")))?;

    let mut document = Document::new(product.text, url.to_string());
    if !product.title.is_empty() {
        document.metadata.insert(META_TITLE.to_string(), product.title);
    }

    Ok(vec![document])
}
