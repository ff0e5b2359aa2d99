//! Content loading.
//!
//! The page has exactly one data source: the JSON content document. It is
//! fetched once per page load and the parsed result is shared by every section
//! through a single [`Shared`] future, so all sections observe the same
//! snapshot and the resource is never fetched twice.
//!
//! Failures never reach the sections as errors. A failed fetch or a malformed
//! document resolves the shared handle to `None` and each section stays in its
//! static default state. There is no retry and no timeout; a stalled fetch
//! simply never resolves.

use crate::types::ContentDocument;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content request returned {0}")]
    Status(reqwest::StatusCode),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the content document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Remote(String),
}

impl ContentSource {
    /// `http://` and `https://` locations are remote; anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ContentSource::Remote(location.to_string())
        } else {
            ContentSource::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Parse a content document. Malformed JSON is an error; missing fields are not.
pub fn parse_document(text: &str) -> Result<ContentDocument, ContentError> {
    Ok(serde_json::from_str(text)?)
}

/// Fetch and parse the content document once.
pub async fn fetch_document(
    source: &ContentSource,
    client: &reqwest::Client,
) -> Result<ContentDocument, ContentError> {
    tracing::debug!(%source, "fetching content document");
    let text = match source {
        ContentSource::File(path) => tokio::fs::read_to_string(path).await?,
        ContentSource::Remote(url) => {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ContentError::Status(status));
            }
            response.text().await?
        }
    };
    let document = parse_document(&text)?;
    tracing::debug!(
        slider = document.slider_images.len(),
        categories = document.categories.len(),
        gallery = document.gallery_images.len(),
        "parsed content document"
    );
    Ok(document)
}

/// Resolved content as seen by the sections: `None` when loading failed.
pub type SharedContent = Shared<BoxFuture<'static, Option<Arc<ContentDocument>>>>;

/// One shared asynchronous load of the content document.
///
/// Nothing happens until the first consumer polls [`ContentStore::document`];
/// later consumers await the same in-flight (or finished) load.
#[derive(Clone)]
pub struct ContentStore {
    source: ContentSource,
    shared: SharedContent,
}

impl ContentStore {
    pub fn new(source: ContentSource, client: reqwest::Client) -> Self {
        let fetch_source = source.clone();
        let shared = async move {
            match fetch_document(&fetch_source, &client).await {
                Ok(document) => Some(Arc::new(document)),
                Err(err) => {
                    tracing::warn!(source = %fetch_source, "content unavailable, keeping static defaults: {err}");
                    None
                }
            }
        }
        .boxed()
        .shared();
        Self { source, shared }
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Handle resolving to the shared document snapshot.
    pub fn document(&self) -> SharedContent {
        self.shared.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_source_kinds() {
        assert_eq!(
            ContentSource::parse("https://example.com/data.json"),
            ContentSource::Remote("https://example.com/data.json".to_string())
        );
        assert_eq!(
            ContentSource::parse("data/portfolio.json"),
            ContentSource::File(PathBuf::from("data/portfolio.json"))
        );
    }

    #[test]
    fn parse_document_rejects_malformed_json() {
        assert!(matches!(
            parse_document("{ not json"),
            Err(ContentError::Json(_))
        ));
    }

    #[tokio::test]
    async fn fetch_reads_local_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("portfolio.json");
        fs::write(&path, r#"{"slider-images": ["a.jpg"]}"#).unwrap();

        let source = ContentSource::File(path);
        let document = fetch_document(&source, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(document.slider_images, vec!["a.jpg"]);
    }

    #[tokio::test]
    async fn missing_file_resolves_to_none() {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::new(
            ContentSource::File(tmp.path().join("absent.json")),
            reqwest::Client::new(),
        );
        assert!(store.document().await.is_none());
    }

    #[tokio::test]
    async fn malformed_file_resolves_to_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("portfolio.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = ContentStore::new(ContentSource::File(path), reqwest::Client::new());
        assert!(store.document().await.is_none());
    }

    #[tokio::test]
    async fn consumers_share_one_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("portfolio.json");
        fs::write(&path, r#"{"gallery-images": ["g.jpg"]}"#).unwrap();

        let store = ContentStore::new(ContentSource::File(path.clone()), reqwest::Client::new());
        let first = store.document().await.unwrap();

        // The file changing after the load is invisible to later consumers.
        fs::write(&path, r#"{"gallery-images": []}"#).unwrap();
        let second = store.document().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.gallery_images, vec!["g.jpg"]);
    }
}
