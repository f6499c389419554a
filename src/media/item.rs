//! Downloadable media assets.

use std::fmt;

/// Role an asset plays within a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRole {
    Video,
    /// Image at the given position of a photo set.
    Image(usize),
    Audio,
    Cover,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRole::Video => write!(f, "video"),
            AssetRole::Image(i) => write!(f, "image {}", i),
            AssetRole::Audio => write!(f, "audio"),
            AssetRole::Cover => write!(f, "cover"),
        }
    }
}

/// A media URL paired with the file it is saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub url: String,
    pub role: AssetRole,
    pub file_name: String,
}

impl MediaAsset {
    pub fn new(url: impl Into<String>, role: AssetRole, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            role,
            file_name: file_name.into(),
        }
    }
}

/// Title used when the post's music has none.
pub const DEFAULT_MUSIC_TITLE: &str = "TikTokMusic";

/// Performer used when the post's music has no author.
pub const DEFAULT_MUSIC_AUTHOR: &str = "Unknown";

/// Background music of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicInfo {
    pub play_url: String,
    pub cover_url: Option<String>,
    pub title: String,
    pub author: String,
}
