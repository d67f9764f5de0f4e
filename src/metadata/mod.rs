//! Embedding and stripping artwork in audio file tags.
//!
//! Uses the lofty crate for format-independent tag access (MP3, FLAC, OGG,
//! M4A, WAV). When lofty cannot read or write an MPEG file, the ID3v2
//! picture frames are edited directly through the `id3` crate (see
//! [`frame`]). Other containers have no fallback.
//!
//! # Policy
//! - Artwork present and artist tag contains the band: skip
//! - Artwork present, artist differs: replace
//! - No artwork: write
//!
//! A failing file is reported, never raised; the caller moves on to the
//! next track.

mod frame;

use std::fmt;
use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{FileType, TaggedFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt, TagType};
use tracing::{debug, warn};

use crate::artwork::ArtworkImage;
use crate::error::{Error, Result};

/// What a file's tags say before we touch them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagState {
    pub artist: Option<String>,
    pub has_artwork: bool,
}

impl TagState {
    /// Case-insensitive containment, so "Cosmonkey Band" matches "Cosmonkey".
    pub fn artist_matches(&self, band: &str) -> bool {
        self.artist
            .as_deref()
            .is_some_and(|artist| artist.to_lowercase().contains(&band.to_lowercase()))
    }
}

/// Decision taken from a [`TagState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedAction {
    Skip,
    Replace,
    Write,
}

/// Which encoder wrote the artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// lofty, through the format's primary tag
    Lofty,
    /// Direct ID3v2 APIC frame editing
    FrameLevel,
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lofty => f.write_str("tag"),
            Self::FrameLevel => f.write_str("ID3 frame"),
        }
    }
}

/// Per-file result of an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    Written(Encoder),
    Replaced(Encoder),
    Skipped,
    Failed(String),
}

/// Per-file result of a strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// Number of pictures removed (may be zero)
    Removed(usize),
    /// The file carries no tag at all
    NoTag,
    Failed(String),
}

/// Read the artist tag and artwork presence.
pub fn read_tag_state(path: &Path) -> Result<TagState> {
    let tagged_file = open(path)?;

    // Primary tag first; an older tag (ID3v1) may still hold the artist
    let artist = tagged_file
        .primary_tag()
        .and_then(|t| t.artist())
        .or_else(|| tagged_file.tags().iter().find_map(|t| t.artist()))
        .map(|s| s.trim().to_string());

    Ok(TagState {
        artist,
        has_artwork: tagged_file.tags().iter().any(|t| !t.pictures().is_empty()),
    })
}

/// Skip/replace/write policy.
///
/// Without a band the artist cannot be verified, so artwork already in
/// place is kept.
pub fn decide(state: &TagState, band: Option<&str>) -> EmbedAction {
    if !state.has_artwork {
        return EmbedAction::Write;
    }
    match band {
        Some(band) if state.artist_matches(band) => EmbedAction::Skip,
        Some(_) => EmbedAction::Replace,
        None => EmbedAction::Skip,
    }
}

/// Embed `image` as the front cover of `path`, following [`decide`].
pub fn embed_artwork(path: &Path, image: &ArtworkImage, band: Option<&str>) -> EmbedOutcome {
    let action = match read_tag_state(path) {
        Ok(state) => decide(&state, band),
        Err(e) => {
            debug!("Tag state unreadable, writing fresh: {}", e);
            EmbedAction::Write
        }
    };

    let encoder = match action {
        EmbedAction::Skip => return EmbedOutcome::Skipped,
        EmbedAction::Replace | EmbedAction::Write => match write_with_lofty(path, image) {
            Ok(()) => Encoder::Lofty,
            Err(primary) if !is_mpeg(path) => {
                return EmbedOutcome::Failed(primary.to_string());
            }
            Err(primary) => {
                warn!("{}; retrying with ID3 frames", primary);
                match frame::write_cover(path, &image.data) {
                    Ok(()) => Encoder::FrameLevel,
                    Err(fallback) => {
                        return EmbedOutcome::Failed(format!("{}; {}", primary, fallback));
                    }
                }
            }
        },
    };

    if action == EmbedAction::Replace {
        EmbedOutcome::Replaced(encoder)
    } else {
        EmbedOutcome::Written(encoder)
    }
}

/// Remove every embedded picture from `path`.
pub fn strip_artwork(path: &Path) -> StripOutcome {
    match strip_with_lofty(path) {
        Ok(outcome) => outcome,
        Err(primary) if !is_mpeg(path) => StripOutcome::Failed(primary.to_string()),
        Err(primary) => {
            debug!("{}; retrying with ID3 frames", primary);
            frame::strip_pictures(path).unwrap_or_else(|fallback| {
                StripOutcome::Failed(format!("{}; {}", primary, fallback))
            })
        }
    }
}

/// ID3 frames only belong in MPEG audio. Content decides; the extension
/// is the tiebreak when the content is unrecognisable.
fn is_mpeg(path: &Path) -> bool {
    let guessed = Probe::open(path)
        .and_then(|probe| probe.guess_file_type().map_err(Into::into))
        .ok()
        .and_then(|probe| probe.file_type());

    match guessed {
        Some(file_type) => file_type == FileType::Mpeg,
        None => path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3")),
    }
}

fn open(path: &Path) -> Result<TaggedFile> {
    Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| Error::metadata(path, e.to_string()))
}

fn write_with_lofty(path: &Path, image: &ArtworkImage) -> Result<()> {
    let mut tagged_file = open(path)?;

    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| Error::metadata(path, format!("cannot create {:?} tag", tag_type)))?;

    clear_pictures(tag);
    tag.push_picture(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(sniff_mime(&image.data)),
        None,
        image.data.clone(),
    ));

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::metadata(path, e.to_string()))
}

fn strip_with_lofty(path: &Path) -> Result<StripOutcome> {
    let mut tagged_file = open(path)?;

    if tagged_file.tags().is_empty() {
        return Ok(StripOutcome::NoTag);
    }

    let tag_types: Vec<TagType> = tagged_file.tags().iter().map(|t| t.tag_type()).collect();
    let mut removed = 0;

    for tag_type in tag_types {
        let Some(tag) = tagged_file.tag_mut(tag_type) else {
            continue;
        };
        let count = clear_pictures(tag);
        if count > 0 {
            tag.save_to_path(path, WriteOptions::default())
                .map_err(|e| Error::metadata(path, e.to_string()))?;
            removed += count;
        }
    }

    Ok(StripOutcome::Removed(removed))
}

/// Remove all pictures, returning how many there were.
fn clear_pictures(tag: &mut Tag) -> usize {
    let count = tag.pictures().len();
    for _ in 0..count {
        tag.remove_picture(0);
    }
    count
}

/// PNG by signature, JPEG otherwise.
fn sniff_mime(data: &[u8]) -> MimeType {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        MimeType::Png
    } else {
        MimeType::Jpeg
    }
}
