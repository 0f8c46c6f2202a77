//! Album folder discovery.
//!
//! Walks a music tree and reports each folder that holds MP3 files but has no
//! cover image yet, together with the artist/album query derived from its
//! name.

use futures::stream::Stream;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::artwork::SearchQuery;

/// A folder that needs cover art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumFolder {
    pub path: PathBuf,
    pub query: SearchQuery,
    /// Where the finished image is written
    pub destination: PathBuf,
}

/// Why a folder with audio files was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The target image already exists
    HasCover,
    /// No artist/album could be read from the folder name
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Album(AlbumFolder),
    Skipped(PathBuf, SkipReason),
}

/// Scan `root` recursively for album folders missing `cover_file_name`.
///
/// Folders without an `.mp3` directly inside are not reported at all.
pub fn scan(root: PathBuf, cover_file_name: String) -> impl Stream<Item = ScanEvent> {
    let (tx, rx) = mpsc::channel(100);

    // Spawn a blocking task to perform the synchronous file system traversal
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_dir() || !contains_mp3(entry.path()) {
                continue;
            }
            let event = classify(entry.path(), &cover_file_name);
            // If the receiver is dropped, stop scanning
            if tx.blocking_send(event).is_err() {
                break;
            }
        }
    });

    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
}

fn classify(dir: &Path, cover_file_name: &str) -> ScanEvent {
    let destination = dir.join(cover_file_name);
    if destination.exists() {
        return ScanEvent::Skipped(dir.to_path_buf(), SkipReason::HasCover);
    }

    match artist_album_from_folder(dir) {
        Some(query) => ScanEvent::Album(AlbumFolder {
            path: dir.to_path_buf(),
            query,
            destination,
        }),
        None => ScanEvent::Skipped(dir.to_path_buf(), SkipReason::Unrecognized),
    }
}

/// Whether `dir` directly contains an MP3 (case-insensitive extension).
fn contains_mp3(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.filter_map(|e| e.ok()).any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
    })
}

/// Derive the search query from an album folder's location.
///
/// `Artist - Album` folder names are split on the first ` - `; otherwise the
/// parent folder is taken as the artist: `Artist/Album`.
pub fn artist_album_from_folder(dir: &Path) -> Option<SearchQuery> {
    let name = dir.file_name()?.to_str()?.trim();

    if let Some((artist, album)) = name.split_once(" - ") {
        let (artist, album) = (artist.trim(), album.trim());
        if !artist.is_empty() && !album.is_empty() {
            return Some(SearchQuery::new(artist, album));
        }
    }

    let parent = dir.parent()?.file_name()?.to_str()?.trim();
    if name.is_empty() || parent.is_empty() {
        return None;
    }
    Some(SearchQuery::new(parent, name))
}
