//! HTTP client for the product search API and image downloads.

use async_trait::async_trait;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use super::domain::ArtworkError;
use super::traits::{BodyReader, Fetcher};

/// User agent sent with every request
const USER_AGENT: &str = concat!("AlbumArtFinder/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed [`Fetcher`].
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ArtworkError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ArtworkError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ArtworkError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ArtworkError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Fetch(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_stream(&self, url: &str) -> Result<BodyReader, ArtworkError> {
        let response = self.get(url).await?;
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::new(StreamReader::new(stream)))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ArtworkError> {
        let response = self.get(url).await?;
        let data = response
            .bytes()
            .await
            .map_err(|e| ArtworkError::Fetch(e.to_string()))?;
        Ok(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("AlbumArtFinder/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new().unwrap();
        // Port 9 (discard) on localhost is closed in test environments
        let result = fetcher.fetch_bytes("http://127.0.0.1:9/cover.jpg").await;
        assert!(matches!(result, Err(ArtworkError::Fetch(_))));
    }
}
