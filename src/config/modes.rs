//! Download mode and signer selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to download from a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Video or photo set depending on the post kind (default).
    #[default]
    Auto,
    /// Only the video of a video post.
    Video,
    /// Only the images of a photo post.
    Photo,
    /// Only the background music, tagged.
    Music,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Auto => write!(f, "auto"),
            DownloadMode::Video => write!(f, "video"),
            DownloadMode::Photo => write!(f, "photo"),
            DownloadMode::Music => write!(f, "music"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DownloadMode::Auto),
            "video" => Ok(DownloadMode::Video),
            "photo" | "image" => Ok(DownloadMode::Photo),
            "music" | "audio" => Ok(DownloadMode::Music),
            _ => Err(format!("Unknown download mode: {}", s)),
        }
    }
}

/// Which signing implementation produces the request token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerKind {
    /// External Node.js script (`index.js`).
    #[default]
    Script,
    /// Built-in implementation.
    Native,
}

impl fmt::Display for SignerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerKind::Script => write!(f, "script"),
            SignerKind::Native => write!(f, "native"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trips_through_display() {
        for mode in [
            DownloadMode::Auto,
            DownloadMode::Video,
            DownloadMode::Photo,
            DownloadMode::Music,
        ] {
            assert_eq!(mode.to_string().parse::<DownloadMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!("IMAGE".parse::<DownloadMode>().unwrap(), DownloadMode::Photo);
        assert_eq!("audio".parse::<DownloadMode>().unwrap(), DownloadMode::Music);
        assert!("slideshow".parse::<DownloadMode>().is_err());
    }
}
