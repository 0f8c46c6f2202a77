//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ArtworkError`], [`ConfigError`]), while the CLI uses `anyhow` for
//! convenient error propagation.

use std::path::PathBuf;

use crate::artwork::ArtworkError;
use crate::config::ConfigError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Album art lookup error
    #[error("Lookup error: {0}")]
    Artwork(#[from] ArtworkError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),

    /// Path not found
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Credentials missing from config and environment
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a logging error.
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
