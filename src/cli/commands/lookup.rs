//! Single album lookup command.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::artwork::{AlbumArtService, LookupOutcome, SearchQuery};
use crate::config::Config;
use crate::error::{Error, ResultExt};

use super::require_credentials;

/// Look up and save the cover for one artist/album pair
pub fn cmd_lookup(
    rt: &Runtime,
    config: &Config,
    artist: &str,
    album: &str,
    output: &Path,
) -> anyhow::Result<()> {
    require_credentials(config)?;
    let service = AlbumArtService::from_config(config)?;
    let query = SearchQuery::new(artist, album);

    let outcome = rt
        .block_on(service.find_album_art(&query, output))
        .map_err(Error::from)
        .with_context(format!("Looking up {}", query))?;
    match outcome {
        LookupOutcome::Saved {
            destination,
            candidate,
            plan,
        } => {
            println!("✓ Match found: {} - {}", candidate.artist, candidate.album);
            println!(
                "  Source: {} ({}x{})",
                candidate.image_url, candidate.image_width, candidate.image_height
            );
            println!(
                "  Resize: {} then crop {}x{}",
                plan.mode.to_geometry_arg(),
                plan.target_width,
                plan.target_height
            );
            println!("  Saved:  {}", destination.display());
        }
        LookupOutcome::NotFound => {
            println!("✗ No matching album found for {}", query);
        }
    }
    Ok(())
}
