//! Library scan command.

use std::path::Path;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::artwork::{AlbumArtService, LookupOutcome};
use crate::config::Config;
use crate::error::Error;
use crate::scanner::{self, ScanEvent, SkipReason};

use super::require_credentials;

/// Tally of one scan run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub saved: usize,
    pub not_found: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Look up covers for every album folder under `path`
pub fn cmd_scan(rt: &Runtime, config: &Config, path: &Path, dry_run: bool) -> anyhow::Result<()> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()).into());
    }
    if !dry_run {
        require_credentials(config)?;
    }
    let service = AlbumArtService::from_config(config)?;

    let summary = rt.block_on(async {
        use futures::StreamExt;
        let stream = scanner::scan(path.to_path_buf(), config.image.file_name.clone());
        let mut stream = std::pin::pin!(stream);
        let mut summary = ScanSummary::default();

        while let Some(event) = stream.next().await {
            match event {
                ScanEvent::Skipped(dir, reason) => {
                    summary.skipped += 1;
                    match reason {
                        SkipReason::HasCover => debug!(path = %dir.display(), "Cover exists"),
                        SkipReason::Unrecognized => {
                            debug!(path = %dir.display(), "No artist/album in folder name")
                        }
                    }
                }
                ScanEvent::Album(album) if dry_run => {
                    println!("{} -> {}", album.query, album.destination.display());
                }
                ScanEvent::Album(album) => {
                    // A failure is already logged by the service; keep going
                    match service.find_album_art(&album.query, &album.destination).await {
                        Ok(LookupOutcome::Saved { .. }) => summary.saved += 1,
                        Ok(LookupOutcome::NotFound) => summary.not_found += 1,
                        Err(_) => summary.failed += 1,
                    }
                }
            }
        }
        summary
    });

    info!("Finished");
    println!(
        "\nScan complete. Saved: {}, not found: {}, failed: {}, skipped: {}",
        summary.saved, summary.not_found, summary.failed, summary.skipped
    );
    Ok(())
}
