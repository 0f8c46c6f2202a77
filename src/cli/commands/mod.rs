//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `lookup`: one artist/album lookup
//! - `scan`: lookups for every album folder under a path
//! - `tools`: tool checks and config file setup

mod lookup;
mod scan;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;

pub use lookup::cmd_lookup;
pub use scan::cmd_scan;
pub use tools::{cmd_check_tools, cmd_init_config};

/// Album Art Finder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Product API access key (or set AMAZON_ACCESS_KEY env var)
    #[arg(long, env = "AMAZON_ACCESS_KEY", global = true, hide_env_values = true)]
    pub access_key: Option<String>,

    /// Product API secret key (or set AMAZON_SECRET_KEY env var)
    #[arg(long, env = "AMAZON_SECRET_KEY", global = true, hide_env_values = true)]
    pub secret_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Find cover art for one album
    Lookup {
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Album name
        #[arg(long)]
        album: String,
        /// Where to write the resized image
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Find cover art for every album folder under a path
    Scan {
        /// Root of the music library
        path: PathBuf,
        /// List the folders that would be looked up without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Check that the image tool and credentials are available
    CheckTools,
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Command-line and environment credentials take precedence over the file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(key) = &self.access_key {
            config.credentials.access_key = Some(key.clone());
        }
        if let Some(key) = &self.secret_key {
            config.credentials.secret_key = Some(key.clone());
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli, config: Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Lookup {
            artist,
            album,
            output,
        } => {
            let rt = Runtime::new()?;
            cmd_lookup(&rt, &config, artist, album, output)
        }
        Commands::Scan { path, dry_run } => {
            let rt = Runtime::new()?;
            cmd_scan(&rt, &config, path, *dry_run)
        }
        Commands::CheckTools => cmd_check_tools(&config),
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), *force),
    }
}

/// Fail early with setup instructions when credentials are missing.
fn require_credentials(config: &Config) -> anyhow::Result<()> {
    if config.credentials.is_complete() {
        return Ok(());
    }
    Err(crate::error::Error::MissingCredentials(
        "set access_key and secret_key in the config file, \
         pass --access-key/--secret-key, or set AMAZON_ACCESS_KEY/AMAZON_SECRET_KEY"
            .to_string(),
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from([
            "album-art-finder",
            "lookup",
            "--artist",
            "Blur",
            "--album",
            "Parklife",
            "-o",
            "folder.jpg",
        ])
        .unwrap();
        match cli.command {
            Commands::Lookup {
                artist,
                album,
                output,
            } => {
                assert_eq!(artist, "Blur");
                assert_eq!(album, "Parklife");
                assert_eq!(output, PathBuf::from("folder.jpg"));
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "album-art-finder",
            "--access-key",
            "from-flag",
            "scan",
            "/music",
        ])
        .unwrap();
        let mut config = Config::default();
        config.credentials.access_key = Some("from-file".to_string());
        config.credentials.secret_key = Some("file-secret".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.credentials.access_key.as_deref(), Some("from-flag"));
        // Not given on the command line, so the file value stays
        if std::env::var("AMAZON_SECRET_KEY").is_err() {
            assert_eq!(config.credentials.secret_key.as_deref(), Some("file-secret"));
        }
    }

    #[test]
    fn test_require_credentials() {
        assert!(require_credentials(&Config::default()).is_err());
    }
}
