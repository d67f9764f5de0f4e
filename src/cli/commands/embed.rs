//! Artwork embedding commands.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::library::{self, AlbumMatch, AlbumUnit, WorkUnit};
use crate::service::ArtworkService;

use super::{Tally, print_unit};

/// Embed artwork into every album folder under `root`
pub fn cmd_folders(
    rt: &Runtime,
    service: &ArtworkService,
    root: &Path,
    band: &str,
    album_filter: Option<&str>,
    config: &Config,
) -> anyhow::Result<()> {
    let units = library::album_units(root, Some(band), album_filter, &config.library.extensions)?;

    if units.is_empty() {
        match album_filter {
            Some(album) => println!("Album '{}' not found in {}", album, root.display()),
            None => println!("No album folders in {}", root.display()),
        }
        return Ok(());
    }

    println!("Processing {} album(s) by {}", units.len(), band);
    let mut tally = Tally::default();
    for unit in units {
        let unit = WorkUnit::Album(unit);
        let outcome = rt.block_on(service.process(&unit));
        print_unit(&unit.label(), &outcome, &mut tally);
    }
    tally.print();
    Ok(())
}

/// Embed artwork into each top-level audio file under `root`
pub fn cmd_files(
    rt: &Runtime,
    service: &ArtworkService,
    root: &Path,
    band: Option<&str>,
    config: &Config,
) -> anyhow::Result<()> {
    let units = library::track_units(root, band, &config.library.extensions)?;

    if units.is_empty() {
        println!("No audio files in {}", root.display());
        return Ok(());
    }

    println!("Processing {} file(s)", units.len());
    let mut tally = Tally::default();
    for unit in units {
        let unit = WorkUnit::Track(unit);
        let outcome = rt.block_on(service.process(&unit));
        print_unit(&unit.label(), &outcome, &mut tally);
    }
    tally.print();
    Ok(())
}

/// Embed the front cover of a known release into the named album folder
pub fn cmd_release(
    rt: &Runtime,
    service: &ArtworkService,
    root: &Path,
    release_id: &str,
    album: &str,
    config: &Config,
) -> anyhow::Result<()> {
    let folders = library::find_album_folders(root, album, AlbumMatch::Exact)?;
    let Some(folder) = folders.first() else {
        println!("Album '{}' not found in {}", album, root.display());
        return Ok(());
    };

    let unit = AlbumUnit::from_folder(folder, None, &config.library.extensions);
    let label = WorkUnit::Album(unit.clone()).label();

    println!("Embedding release {} into {}", release_id, folder.display());
    let mut tally = Tally::default();
    let outcome = rt.block_on(service.embed_release(release_id, &unit));
    print_unit(&label, &outcome, &mut tally);
    tally.print();
    Ok(())
}
