//! Frame-level ID3v2 picture editing.
//!
//! Used when lofty rejects a file (broken MPEG stream, odd header). The tag
//! is rewritten as ID3v2.4.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};

use super::StripOutcome;
use crate::error::{Error, Result};

/// Replace every APIC frame with a single JPEG front cover.
pub(super) fn write_cover(path: &Path, data: &[u8]) -> Result<()> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(Error::metadata(path, format!("read_from_path failed: {e}"))),
    };

    tag.remove_all_pictures();
    tag.add_frame(Picture {
        mime_type: "image/jpeg".to_string(),
        picture_type: PictureType::CoverFront,
        description: "Cover".to_string(),
        data: data.to_vec(),
    });

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|e| Error::metadata(path, format!("write_to_path failed: {e}")))
}

/// Remove every APIC frame. A file without an ID3 tag is a no-op.
pub(super) fn strip_pictures(path: &Path) -> Result<StripOutcome> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => return Ok(StripOutcome::NoTag),
        Err(e) => return Err(Error::metadata(path, format!("read_from_path failed: {e}"))),
    };

    let count = tag.pictures().count();
    if count > 0 {
        tag.remove_all_pictures();
        tag.write_to_path(path, tag.version())
            .map_err(|e| Error::metadata(path, format!("write_to_path failed: {e}")))?;
    }
    Ok(StripOutcome::Removed(count))
}
