//! Album art lookup - finds cover images through a product search API.
//!
//! # Architecture
//!
//! The lookup is split into small, independently testable pieces:
//! - **Normalize** (`normalize.rs`) - noise-word stripping shared by search and scoring
//! - **Signer** (`signer.rs`) - canonical, HMAC-signed request URLs
//! - **Extractor** (`extractor.rs`) - streaming element-path parser for search results
//! - **Selector** (`selector.rs`) - edit-distance scoring with first-wins ties
//! - **Geometry** (`geometry.rs`) - cover-fit resize planning
//! - **Client / Transform** - the HTTP and ImageMagick collaborators behind traits
//! - **Service** - sequential orchestration of a single lookup
//!
//! # Usage
//!
//! ```ignore
//! use artwork::{AlbumArtService, SearchQuery};
//!
//! let service = AlbumArtService::from_config(&config)?;
//! let outcome = service
//!     .find_album_art(&SearchQuery::new("Pink Floyd", "Animals"), Path::new("folder.jpg"))
//!     .await?;
//! ```

pub mod client;
pub mod domain;
pub mod extractor;
pub mod geometry;
pub mod normalize;
pub mod selector;
pub mod service;
pub mod signer;
pub mod traits;
pub mod transform;

pub use domain::{ArtworkError, LookupOutcome, SearchQuery};
pub use service::AlbumArtService;
pub use transform::ImageMagick;
