//! Artwork removal.

use std::path::Path;

use crate::config::Config;
use crate::library::{self, AlbumMatch, AlbumUnit};
use crate::service;

use super::print_strip;

/// Strip embedded artwork from every album folder whose name contains `album`
pub fn cmd_clean(root: &Path, album: &str, config: &Config) -> anyhow::Result<()> {
    let folders = library::find_album_folders(root, album, AlbumMatch::Contains)?;

    if folders.is_empty() {
        println!("Album '{}' not found in {}", album, root.display());
        return Ok(());
    }

    for folder in folders {
        let unit = AlbumUnit::from_folder(&folder, None, &config.library.extensions);
        println!("Cleaning {}", folder.display());
        if unit.tracks.is_empty() {
            println!("  - No audio files");
            continue;
        }
        for report in service::clean_album(&unit) {
            print_strip(&report);
        }
    }
    Ok(())
}
