//! Configuration structures and loading logic.

use crate::config::modes::{DownloadMode, SignerKind};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    #[serde(default)]
    pub signer: SignerConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Browser user agent string, also fed to the signer.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Referer header value.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Item detail endpoint the signed query is appended to.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Simulated browser environment sent with the detail request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintConfig {
    #[serde(default = "default_locale")]
    pub app_language: String,

    #[serde(default = "default_locale")]
    pub browser_language: String,

    #[serde(default = "default_browser_platform")]
    pub browser_platform: String,

    #[serde(default = "default_locale")]
    pub language: String,

    #[serde(default = "default_os")]
    pub os: String,

    #[serde(default = "default_region")]
    pub priority_region: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    #[serde(default = "default_tz_name")]
    pub tz_name: String,

    #[serde(default = "default_locale")]
    pub webcast_language: String,
}

/// Request signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Signing implementation.
    #[serde(default)]
    pub kind: SignerKind,

    /// Directory holding `index.js` and `xbogus.js`.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// Node.js executable.
    #[serde(default = "default_node_binary")]
    pub node_binary: String,

    /// Refresh the signing scripts from `script_base_url` at startup.
    #[serde(default = "default_true")]
    pub auto_update: bool,

    /// Raw URL prefix the signing scripts are fetched from.
    #[serde(default = "default_script_base_url")]
    pub script_base_url: String,

    /// Seconds a single signing call may take.
    #[serde(default = "default_sign_timeout")]
    pub timeout_secs: u64,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Download mode (auto, video, photo, music).
    #[serde(default)]
    pub download_mode: DownloadMode,

    /// Output folder for saved files.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// File name for a downloaded video.
    #[serde(default = "default_video_file_name")]
    pub video_file_name: String,

    /// Base file name for photo sets, indexed per image.
    #[serde(default = "default_photo_file_name")]
    pub photo_file_name: String,

    /// File name for downloaded music.
    #[serde(default = "default_music_file_name")]
    pub music_file_name: String,

    /// In auto mode, also save the post's music.
    #[serde(default)]
    pub include_music: bool,

    /// Save each post into a subfolder named after its id.
    #[serde(default)]
    pub per_post_folder: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            referer: default_referer(),
            api_base: default_api_base(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            app_language: default_locale(),
            browser_language: default_locale(),
            browser_platform: default_browser_platform(),
            language: default_locale(),
            os: default_os(),
            priority_region: default_region(),
            region: default_region(),
            screen_height: default_screen_height(),
            screen_width: default_screen_width(),
            tz_name: default_tz_name(),
            webcast_language: default_locale(),
        }
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            kind: SignerKind::default(),
            scripts_dir: None,
            node_binary: default_node_binary(),
            auto_update: true,
            script_base_url: default_script_base_url(),
            timeout_secs: default_sign_timeout(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_mode: DownloadMode::default(),
            output_directory: None,
            video_file_name: default_video_file_name(),
            photo_file_name: default_photo_file_name(),
            music_file_name: default_music_file_name(),
            include_music: false,
            per_post_folder: false,
            show_downloads: true,
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_referer() -> String {
    "https://www.tiktok.com/".to_string()
}

fn default_api_base() -> String {
    "https://www.tiktok.com/api/item/detail/".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    120
}

fn default_locale() -> String {
    "uk-UA".to_string()
}

fn default_browser_platform() -> String {
    "Win32".to_string()
}

fn default_os() -> String {
    "windows".to_string()
}

fn default_region() -> String {
    "UA".to_string()
}

fn default_screen_height() -> u32 {
    1080
}

fn default_screen_width() -> u32 {
    1920
}

fn default_tz_name() -> String {
    "Europe/Kiev".to_string()
}

fn default_node_binary() -> String {
    "node".to_string()
}

fn default_script_base_url() -> String {
    "https://raw.githubusercontent.com/MrNaniii/TikTokDownloader/main/TikTokDownloader/Scripts"
        .to_string()
}

fn default_sign_timeout() -> u64 {
    30
}

fn default_video_file_name() -> String {
    "video.mp4".to_string()
}

fn default_photo_file_name() -> String {
    "photo.jpg".to_string()
}

fn default_music_file_name() -> String {
    "music.mp3".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the effective signing scripts directory.
    pub fn scripts_directory(&self) -> PathBuf {
        self.signer
            .scripts_dir
            .clone()
            .unwrap_or_else(crate::fs::default_scripts_dir)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.client.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.client.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.client.user_agent, "Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert_eq!(config.fingerprint.tz_name, "Europe/Kiev");
        assert_eq!(config.signer.kind, SignerKind::Script);
        assert_eq!(config.options.download_mode, DownloadMode::Auto);
        assert_eq!(config.options.photo_file_name, "photo.jpg");
    }

    #[test]
    fn test_partial_sections_are_merged_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [fingerprint]
            region = "US"

            [signer]
            kind = "native"

            [options]
            download_mode = "music"
            include_music = true
            "#,
        )
        .unwrap();

        assert_eq!(config.fingerprint.region, "US");
        assert_eq!(config.fingerprint.priority_region, "UA");
        assert_eq!(config.signer.kind, SignerKind::Native);
        assert!(config.signer.auto_update);
        assert_eq!(config.options.download_mode, DownloadMode::Music);
        assert!(config.options.include_music);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[options]\noutput_directory = \"/tmp/out\"\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.options.output_directory, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.signer.kind, SignerKind::Script);
        assert_eq!(config.options.music_file_name, "music.mp3");
        assert!(!config.options.per_post_folder);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
