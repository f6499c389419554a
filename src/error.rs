//! Error types for the tiktok-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Page and API errors
    #[error("Failed to fetch page: {0}")]
    PageFetch(String),

    #[error("Embedded JSON payload not found in page")]
    JsonNotFound,

    #[error("Request signing unavailable: {0}")]
    SigningUnavailable(String),

    // Media errors
    #[error("No media found: {0}")]
    MediaNotFound(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    // Download errors
    #[error("Failed to save {file}: {message}")]
    AssetWrite { file: String, message: String },

    #[error("Download cancelled")]
    Cancelled,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Audio tag errors
    #[error("Audio tag error: {0}")]
    Tag(#[from] id3::Error),

    // Invalid file names
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error stops the whole post instead of a single asset.
    pub fn aborts_post(&self) -> bool {
        matches!(
            self,
            Error::PageFetch(_) | Error::SigningUnavailable(_) | Error::Cancelled
        )
    }

    /// Wrap any displayable failure as an asset write error for `file`.
    pub fn asset(file: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::AssetWrite {
            file: file.into(),
            message: err.to_string(),
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const FETCH_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SIGNING_ERROR: i32 = 6;
    pub const SOME_POSTS_FAILED: i32 = 7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors_abort_post() {
        assert!(Error::PageFetch("timeout".into()).aborts_post());
        assert!(Error::SigningUnavailable("node missing".into()).aborts_post());
        assert!(Error::Cancelled.aborts_post());
    }

    #[test]
    fn test_recoverable_errors_do_not_abort() {
        assert!(!Error::JsonNotFound.aborts_post());
        assert!(!Error::MediaNotFound("video".into()).aborts_post());
        assert!(!Error::InvalidLink("https://example.com".into()).aborts_post());
        assert!(!Error::asset("photo_0.jpg", "disk full").aborts_post());
    }

    #[test]
    fn test_asset_error_message() {
        let err = Error::asset("video.mp4", "connection reset");
        assert_eq!(err.to_string(), "Failed to save video.mp4: connection reset");
    }
}
