//! Media URL extraction from post detail documents.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::media::item::{MusicInfo, DEFAULT_MUSIC_AUTHOR, DEFAULT_MUSIC_TITLE};
use crate::media::kind::ContentKind;
use crate::page::{JsonPath, DEFAULT_SCOPE};

/// Locate `itemStruct` in a detail document.
///
/// The detail endpoint answers with `itemInfo.itemStruct` at the root, while
/// post pages may embed the same object under `webapp.video-detail`.
pub fn item_struct(detail: &Value) -> Option<&Value> {
    detail.at(&["itemInfo", "itemStruct"]).or_else(|| {
        detail.at(&[
            DEFAULT_SCOPE,
            "webapp.video-detail",
            "itemInfo",
            "itemStruct",
        ])
    })
}

/// Playback URL of the last (highest bitrate) encoding of a video post.
pub fn extract_video_url(detail: &Value, kind: ContentKind) -> Result<String> {
    if kind != ContentKind::Video {
        return Err(Error::InvalidLink(format!("expected a video post, got {}", kind)));
    }

    item_struct(detail)
        .and_then(|item| item.array_at(&["video", "bitrateInfo"]))
        .and_then(|encodings| encodings.last())
        .and_then(|best| best.str_at(&["PlayAddr", "UrlList", "0"]))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::MediaNotFound("no playable video encoding".to_string()))
}

/// First URL of every image in a photo post, skipping images without one.
pub fn extract_image_urls(detail: &Value, kind: ContentKind) -> Result<Vec<String>> {
    if kind != ContentKind::Photo {
        return Err(Error::InvalidLink(format!("expected a photo post, got {}", kind)));
    }

    let urls: Vec<String> = item_struct(detail)
        .and_then(|item| item.array_at(&["imagePost", "images"]))
        .map(|images| {
            images
                .iter()
                .filter_map(|image| image.str_at(&["imageURL", "urlList", "0"]))
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if urls.is_empty() {
        return Err(Error::MediaNotFound("no images in photo post".to_string()));
    }

    Ok(urls)
}

/// Background music of any post; `None` when it has no playable URL.
pub fn extract_music(detail: &Value) -> Option<MusicInfo> {
    let music = item_struct(detail)?.at(&["music"])?;

    let play_url = music.str_at(&["playUrl"]).filter(|u| !u.is_empty())?;
    let cover_url = music
        .str_at(&["coverLarge"])
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    Some(MusicInfo {
        play_url: play_url.to_string(),
        cover_url,
        title: music
            .str_at(&["title"])
            .unwrap_or(DEFAULT_MUSIC_TITLE)
            .to_string(),
        author: music
            .str_at(&["authorName"])
            .unwrap_or(DEFAULT_MUSIC_AUTHOR)
            .to_string(),
    })
}
