//! Internal domain models for album art lookups.
//!
//! These types are OUR types - the search API's markup shape is handled
//! entirely inside the extractor and never leaks past it.

use std::path::PathBuf;

use super::geometry::{GeometryError, ResizePlan};

/// Artist/album pair a lookup is run for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: String,
    pub album: String,
}

impl SearchQuery {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// Both terms passed through [`super::normalize::normalize`].
    pub fn normalized(&self) -> SearchQuery {
        SearchQuery {
            artist: super::normalize::normalize(&self.artist),
            album: super::normalize::normalize(&self.album),
        }
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} / {}]", self.artist, self.album)
    }
}

/// A fully validated search result.
///
/// Only the extractor constructs these, and only once every field was seen
/// and the image is large enough and the item is an audio CD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub artist: String,
    pub album: String,
    pub image_url: String,
    pub image_width: u32,
    pub image_height: u32,
}

/// Successful end states of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The cover was found, resized and written.
    Saved {
        destination: PathBuf,
        candidate: CandidateItem,
        plan: ResizePlan,
    },
    /// The search returned no item that passed validation.
    NotFound,
}

/// Errors that can abort a single lookup
#[derive(Debug, thiserror::Error)]
pub enum ArtworkError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Invalid image geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Downloaded image is unreadable: {0}")]
    InvalidImage(String),

    #[error("Image transform failed: {0}")]
    Transform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
