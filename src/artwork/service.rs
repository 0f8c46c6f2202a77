//! Album art lookup - orchestrates one search from query to saved file
//!
//! 1. Sign a search request for the normalized artist/album keywords
//! 2. Stream the response through the item extractor
//! 3. Pick the closest candidate
//! 4. Download its image and plan a cover-fit resize
//! 5. Hand the resize + crop to the image tool
//!
//! Each call is independent; nothing carries over between lookups.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use super::client::HttpFetcher;
use super::domain::{ArtworkError, LookupOutcome, SearchQuery};
use super::extractor::extract_items;
use super::geometry;
use super::normalize::search_keywords;
use super::selector::select_best;
use super::signer::{Parameters, RequestSigner};
use super::traits::{Fetcher, ImageTransform};
use super::transform::{ImageMagick, probe_dimensions};
use crate::config::{Config, ImageConfig};

/// Runs album art lookups against the product search API.
pub struct AlbumArtService<F, T> {
    signer: RequestSigner,
    fetcher: F,
    transform: Arc<T>,
    image: ImageConfig,
}

impl AlbumArtService<HttpFetcher, ImageMagick> {
    /// Service wired to the real HTTP client and ImageMagick.
    pub fn from_config(config: &Config) -> Result<Self, ArtworkError> {
        Ok(Self::new(
            RequestSigner::new(&config.api, &config.credentials),
            HttpFetcher::new()?,
            ImageMagick::new(&config.image),
            config.image.clone(),
        ))
    }
}

impl<F: Fetcher, T: ImageTransform + 'static> AlbumArtService<F, T> {
    pub fn new(signer: RequestSigner, fetcher: F, transform: T, image: ImageConfig) -> Self {
        Self {
            signer,
            fetcher,
            transform: Arc::new(transform),
            image,
        }
    }

    /// Signed search URL for `query`.
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let mut params = Parameters::new();
        params.insert("Keywords".to_string(), search_keywords(query));
        params.insert("Operation".to_string(), "ItemSearch".to_string());
        params.insert(
            "ResponseGroup".to_string(),
            "ItemAttributes,Images".to_string(),
        );
        params.insert("SearchIndex".to_string(), "Music".to_string());
        params.insert("salesrank".to_string(), "Bestselling".to_string());
        self.signer.build_signed_url(&params)
    }

    /// Find, resize and save the cover for `query` at `destination`.
    ///
    /// Failures are logged with the query before being returned.
    pub async fn find_album_art(
        &self,
        query: &SearchQuery,
        destination: &Path,
    ) -> Result<LookupOutcome, ArtworkError> {
        let result = self.lookup(query, destination).await;
        if let Err(e) = &result {
            error!(query = %query.normalized(), error = %e, "Album art lookup failed");
        }
        result
    }

    async fn lookup(
        &self,
        query: &SearchQuery,
        destination: &Path,
    ) -> Result<LookupOutcome, ArtworkError> {
        let normalized = query.normalized();
        info!("Searching for: {}", normalized);

        let body = self.fetcher.fetch_stream(&self.search_url(query)).await?;
        let candidates =
            extract_items(body, self.image.target_width, self.image.target_height).await?;

        let Some(best) = select_best(&normalized, &candidates) else {
            warn!("Unable to find album results for: {}", normalized);
            return Ok(LookupOutcome::NotFound);
        };
        info!(
            candidates = candidates.len(),
            artist = %best.artist,
            album = %best.album,
            url = %best.image_url,
            "Found album result for: {}",
            normalized
        );

        let data = self.fetcher.fetch_bytes(&best.image_url).await?;
        let (width, height) = probe_dimensions(&data)?;
        let plan = geometry::plan(
            width,
            height,
            self.image.target_width,
            self.image.target_height,
        )?;

        let staged = self.staging_path();
        tokio::fs::write(&staged, &data).await?;
        let applied = self.apply_transform(&staged, plan, destination).await;
        if let Err(e) = tokio::fs::remove_file(&staged).await {
            warn!(path = %staged.display(), error = %e, "Failed to remove staged image");
        }
        let command_line = applied?;

        info!("Image resize cmd: {}", command_line);
        info!("Saved image to: {}", destination.display());

        Ok(LookupOutcome::Saved {
            destination: destination.to_path_buf(),
            candidate: best.clone(),
            plan,
        })
    }

    /// The image tool blocks, so it runs off the async workers.
    async fn apply_transform(
        &self,
        source: &Path,
        plan: geometry::ResizePlan,
        destination: &Path,
    ) -> Result<String, ArtworkError> {
        let transform = Arc::clone(&self.transform);
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();

        tokio::task::spawn_blocking(move || transform.apply(&source, &plan, &destination))
            .await
            .map_err(|e| ArtworkError::Transform(format!("Resize task failed: {}", e)))?
    }

    fn staging_path(&self) -> PathBuf {
        self.image
            .temp_dir
            .join(format!("album-art-finder-{}.img", std::process::id()))
    }
}
