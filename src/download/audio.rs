//! ID3 tagging for downloaded music.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};
use image::ImageFormat;

use crate::error::Result;
use crate::media::MusicInfo;

/// Description stored with the embedded cover picture.
const COVER_DESCRIPTION: &str = "Cover";

/// Write title and performer to an audio file, embedding `cover` as the front
/// cover when given. Existing tags are kept and updated.
pub fn tag_audio(path: &Path, music: &MusicInfo, cover: Option<&[u8]>) -> Result<()> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(e.into()),
    };

    tag.set_title(music.title.as_str());
    tag.set_artist(music.author.as_str());

    if let Some(data) = cover {
        tag.remove_picture_by_type(PictureType::CoverFront);
        tag.add_frame(Picture {
            mime_type: cover_mime_type(data).to_string(),
            picture_type: PictureType::CoverFront,
            description: COVER_DESCRIPTION.to_string(),
            data: data.to_vec(),
        });
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}

/// MIME type of cover image bytes, `image/jpeg` when unrecognized.
pub fn cover_mime_type(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Gif) => "image/gif",
        _ => "image/jpeg",
    }
}
