//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\album-art-finder\config.toml
//! - macOS: ~/Library/Application Support/album-art-finder/config.toml
//! - Linux: ~/.config/album-art-finder/config.toml
//!
//! Every section has defaults, so a file only needs the keys it changes.
//! The loaded [`Config`] is passed into the components that need it; nothing
//! reads configuration globally.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product API credentials
    pub credentials: Credentials,

    /// Product API endpoint
    pub api: ApiConfig,

    /// Output image settings
    pub image: ImageConfig,

    /// Log file settings
    pub logging: LoggingConfig,
}

/// Product API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Associate tag, sent with every request when set
    pub associate_tag: Option<String>,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        self.access_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.secret_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Product search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub path: String,
    pub service: String,
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "ecs.amazonaws.com".to_string(),
            path: "/onca/xml".to_string(),
            service: "AWSECommerceService".to_string(),
            version: "2009-06-01".to_string(),
        }
    }
}

/// Output image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Final image width in pixels
    pub target_width: u32,

    /// Final image height in pixels
    pub target_height: u32,

    /// File name written into each album folder
    pub file_name: String,

    /// JPEG quality passed to the image tool (1-100)
    pub quality: u8,

    /// ImageMagick `convert` executable
    pub convert_path: PathBuf,

    /// Where downloaded images are staged before resizing
    pub temp_dir: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            target_width: 500,
            target_height: 500,
            file_name: "folder.jpg".to_string(),
            quality: 90,
            convert_path: PathBuf::from("convert"),
            temp_dir: std::env::temp_dir(),
        }
    }
}

/// Log file settings. Console logging is always on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append all lookup activity here
    pub log_file: Option<PathBuf>,

    /// Append warnings and failed lookups here
    pub error_log_file: Option<PathBuf>,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-art-finder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file gives the defaults. A file that exists but can't be read
/// or parsed is an error, since silently ignoring credentials would only
/// surface later as signature failures.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path, e))
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[image]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
access_key = "AKIA123"
secret_key = "shh"

[image]
target_width = 300
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.access_key.as_deref(), Some("AKIA123"));
        assert!(config.credentials.is_complete());
        assert_eq!(config.image.target_width, 300);

        // Other fields use defaults
        assert_eq!(config.image.target_height, 500);
        assert_eq!(config.image.file_name, "folder.jpg");
        assert_eq!(config.api.host, "ecs.amazonaws.com");
        assert!(config.logging.log_file.is_none());
    }

    #[test]
    fn test_credentials_incomplete() {
        let credentials = Credentials {
            access_key: Some("key".to_string()),
            secret_key: Some(String::new()),
            associate_tag: None,
        };
        assert!(!credentials.is_complete());
        assert!(!Credentials::default().is_complete());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.credentials.access_key = Some("k".to_string());
        config.image.quality = 75;
        config.logging.error_log_file = Some(PathBuf::from("/var/log/art-errors.log"));

        save(&config, &path).unwrap();
        let loaded = load(Some(&path)).unwrap();

        assert_eq!(loaded.credentials.access_key.as_deref(), Some("k"));
        assert_eq!(loaded.image.quality, 75);
        assert_eq!(
            loaded.logging.error_log_file,
            Some(PathBuf::from("/var/log/art-errors.log"))
        );
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.image.target_width, 500);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[image]\ntarget_width = \"wide\"\n").unwrap();
        assert!(matches!(load(Some(&path)), Err(ConfigError::Parse(_, _))));
    }
}
