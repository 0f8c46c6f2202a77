//! Album Art Finder - fetches cover images for album folders.
//!
//! Each album is looked up through a signed product search request; the
//! closest matching result's image is downloaded and cover-fit resized into
//! the album folder by ImageMagick.

pub mod artwork;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;

use error::ResultExt;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let mut config = config::load(args.config.as_deref())
        .map_err(error::Error::from)
        .with_context("Loading configuration")?;
    args.apply_overrides(&mut config);

    // Initialize logging
    logging::init(&config.logging)?;

    cli::run_command(&args, config)
}
