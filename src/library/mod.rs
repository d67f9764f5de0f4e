//! Work unit enumeration.
//!
//! A music folder is read either as `<root>/<album folder>/...` (one unit
//! per sub-directory) or as a flat collection of tracks (one unit per
//! top-level audio file). All listings are sorted so runs are repeatable.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::artwork::ArtworkRequest;
use crate::error::{Error, Result, ResultExt};
use crate::normalize::{normalize, title_from_stem};

/// An album folder and the audio files beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumUnit {
    pub folder: PathBuf,
    pub band: Option<String>,
    /// Normalised folder name
    pub title: String,
    /// Audio files, recursively (covers `CD 1`/`CD 2` layouts), sorted
    pub tracks: Vec<PathBuf>,
}

impl AlbumUnit {
    pub fn from_folder(folder: &Path, band: Option<&str>, extensions: &[String]) -> Self {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            folder: folder.to_path_buf(),
            band: band.map(String::from),
            title: normalize(&name),
            tracks: audio_files(folder, extensions),
        }
    }
}

/// A single loose track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackUnit {
    pub path: PathBuf,
    pub band: Option<String>,
    /// Guessed from the file name
    pub title: String,
}

/// One thing to find artwork for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkUnit {
    Album(AlbumUnit),
    Track(TrackUnit),
}

impl WorkUnit {
    /// Folder or file name, for progress output
    pub fn label(&self) -> String {
        let path = match self {
            Self::Album(album) => &album.folder,
            Self::Track(track) => &track.path,
        };
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn band(&self) -> Option<&str> {
        match self {
            Self::Album(album) => album.band.as_deref(),
            Self::Track(track) => track.band.as_deref(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Album(album) => &album.tracks,
            Self::Track(track) => std::slice::from_ref(&track.path),
        }
    }

    /// `None` when the unit has no audio file to work on.
    pub fn request(&self) -> Option<ArtworkRequest<'_>> {
        let sample = self.files().first()?;
        let title = match self {
            Self::Album(album) => album.title.as_str(),
            Self::Track(track) => track.title.as_str(),
        };
        Some(ArtworkRequest {
            band: self.band(),
            title,
            sample,
        })
    }
}

/// How a folder name is compared with a requested album
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumMatch {
    /// Normalised folder name contains the target
    Contains,
    /// Normalised folder name equals the target
    Exact,
}

impl AlbumMatch {
    fn matches(self, folder_title: &str, target: &str) -> bool {
        let folder_title = folder_title.to_lowercase();
        let target = target.trim().to_lowercase();
        match self {
            Self::Contains => folder_title.contains(&target),
            Self::Exact => folder_title == target,
        }
    }
}

/// One unit per album folder directly under `root`.
///
/// With `album_filter`, only folders whose normalised name equals it
/// (case-insensitive) are kept.
pub fn album_units(
    root: &Path,
    band: Option<&str>,
    album_filter: Option<&str>,
    extensions: &[String],
) -> Result<Vec<AlbumUnit>> {
    let units = subfolders(root)?
        .iter()
        .map(|folder| AlbumUnit::from_folder(folder, band, extensions))
        .filter(|unit| {
            album_filter.is_none_or(|album| AlbumMatch::Exact.matches(&unit.title, album))
        })
        .collect();
    Ok(units)
}

/// One unit per audio file at the top level of `root`.
pub fn track_units(
    root: &Path,
    band: Option<&str>,
    extensions: &[String],
) -> Result<Vec<TrackUnit>> {
    ensure_dir(root)?;

    let mut paths: Vec<PathBuf> = std::fs::read_dir(root)
        .with_context(format!("reading {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio(path, extensions))
        .collect();
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            TrackUnit {
                title: title_from_stem(&stem),
                band: band.map(String::from),
                path,
            }
        })
        .collect())
}

/// Album folders under `root` whose normalised name matches `name`.
pub fn find_album_folders(root: &Path, name: &str, mode: AlbumMatch) -> Result<Vec<PathBuf>> {
    Ok(subfolders(root)?
        .into_iter()
        .filter(|folder| {
            let folder_name = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            mode.matches(&normalize(&folder_name), name)
        })
        .collect())
}

/// Audio files under `folder`, recursively, sorted.
pub fn audio_files(folder: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_audio(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_audio(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

fn subfolders(root: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(root)?;

    let mut folders: Vec<PathBuf> = std::fs::read_dir(root)
        .with_context(format!("reading {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

fn ensure_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(Error::not_found(root))
    }
}
