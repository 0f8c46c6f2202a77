//! Trait definitions for the lookup's external collaborators.
//!
//! Production code uses [`HttpFetcher`](super::client::HttpFetcher) and
//! [`ImageMagick`](super::transform::ImageMagick); tests substitute the
//! mocks below so no network or image tool is needed.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;

use super::domain::ArtworkError;
use super::geometry::ResizePlan;

/// Response body consumed as it arrives.
pub type BodyReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// HTTP GET access.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Open `url` and return the body as a streaming reader.
    async fn fetch_stream(&self, url: &str) -> Result<BodyReader, ArtworkError>;

    /// Download the whole body of `url`.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ArtworkError>;
}

/// Resize-and-crop of an image file on disk.
pub trait ImageTransform: Send + Sync {
    /// Apply `plan` to `source`, writing `destination`.
    ///
    /// Returns a printable form of the command that was run, for logging.
    fn apply(
        &self,
        source: &Path,
        plan: &ResizePlan,
        destination: &Path,
    ) -> Result<String, ArtworkError>;
}
