//! Fetching remote resources.

use crate::error::ProvisionError;
use async_trait::async_trait;

/// Fetches a remote resource as text.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` and return its body.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Download` on transport errors and non-success statuses.
    async fn fetch_text(&self, url: &str) -> Result<String, ProvisionError>;
}

/// HTTP downloader backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    /// Downloader with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch_text(&self, url: &str) -> Result<String, ProvisionError> {
        let failed = |e: reqwest::Error| ProvisionError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(failed)?;

        response.text().await.map_err(failed)
    }
}

/// Encode text as single bytes, keeping the low byte of each UTF-16 unit.
///
/// ASCII passes through unchanged; other characters are truncated, not replaced.
pub fn to_ascii_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().map(|unit| (unit & 0xff) as u8).collect()
}
