use crate::{Error, Result};
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;

/// Default cap on a fetched playlist body.
pub const DEFAULT_MAX_PLAYLIST_BYTES: usize = 16 * 1024 * 1024;

/// HTTP client for fetching remote playlists.
#[derive(Clone)]
pub struct PlaylistClient {
    client: Client,
    max_bytes: usize,
}

impl PlaylistClient {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client, max_bytes })
    }

    /// Fetch a playlist as UTF-8 text.
    ///
    /// Bodies larger than the configured cap are rejected without being
    /// read to the end.
    pub async fn fetch_text(&self, url: &str, headers: HeaderMap) -> Result<String> {
        let mut response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let too_large = || Error::FetchFailed {
            url: url.to_string(),
            reason: format!("playlist exceeds {} bytes", self.max_bytes),
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);

        String::from_utf8(body).map_err(|e| Error::FetchFailed {
            url: url.to_string(),
            reason: format!("Invalid UTF-8: {}", e),
        })
    }
}
