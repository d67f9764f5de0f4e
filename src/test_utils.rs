//! Test fixtures shared across modules.
//!
//! Tag tests need a real audio stream that lofty accepts, so
//! [`write_silent_mp3`] synthesises a short MPEG-1 Layer III file instead of
//! checking binary fixtures into the repository.
//!
//! # Example
//!
//! ```ignore
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("01 Rainy.mp3");
//! write_silent_mp3(&path).unwrap();
//! set_artist(&path, "Cosmonkey").unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// 144 * 128000 / 44100, rounded down
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 40;

/// Write an untagged, silent MP3 of about one second.
pub fn write_silent_mp3(path: &Path) -> std::io::Result<()> {
    let mut data = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    std::fs::write(path, data)
}

/// Set the artist tag, creating the primary tag if needed.
pub fn set_artist(path: &Path, artist: &str) -> lofty::error::Result<()> {
    let mut tagged_file = Probe::open(path)?.read()?;
    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    if let Some(tag) = tagged_file.tag_mut(tag_type) {
        tag.set_artist(artist.to_string());
        tag.save_to_path(path, WriteOptions::default())?;
    }
    Ok(())
}

/// Append a 128-byte ID3v1 tag carrying only `artist`, as older rips have.
pub fn append_id3v1(path: &Path, artist: &str) -> std::io::Result<()> {
    let mut tag = Vec::with_capacity(128);
    tag.extend_from_slice(b"TAG");
    tag.resize(33, 0); // title
    let artist = artist.as_bytes();
    tag.extend_from_slice(&artist[..artist.len().min(30)]);
    tag.resize(63, 0);
    tag.resize(127, 0); // album, year, comment
    tag.push(0xFF); // no genre

    let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
    file.write_all(&tag)
}

/// A tiny JPEG-looking payload (SOI, APP0 "JFIF", EOI).
///
/// Tag containers store picture bytes verbatim, so this need not decode.
pub fn sample_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mp3_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.mp3");
        write_silent_mp3(&path).unwrap();

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert!(tagged_file.tags().is_empty());
    }

    #[test]
    fn test_id3v1_artist_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old-rip.mp3");
        write_silent_mp3(&path).unwrap();
        append_id3v1(&path, "Cosmonkey").unwrap();

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        let artist = tagged_file
            .first_tag()
            .and_then(|t| t.artist().map(|a| a.to_string()));
        assert_eq!(artist.as_deref(), Some("Cosmonkey"));
    }

    #[test]
    fn test_set_artist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.mp3");
        write_silent_mp3(&path).unwrap();

        set_artist(&path, "Cosmonkey").unwrap();

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        let artist = tagged_file
            .primary_tag()
            .and_then(|t| t.artist().map(|a| a.to_string()));
        assert_eq!(artist.as_deref(), Some("Cosmonkey"));
    }
}
