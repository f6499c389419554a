//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, DownloadMode, SignerKind};

/// TikTok post downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tiktok-downloader",
    version,
    about = "Download videos, photo sets and music from TikTok posts",
    long_about = "A CLI tool to download the video, the images or the background music of TikTok posts.\n\n\
                  Accepts full post links as well as vm.tiktok.com / vt.tiktok.com short links."
)]
pub struct Args {
    /// Post link(s) to download.
    #[arg(required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// Folder the files are saved into.
    #[arg(short, long = "output")]
    pub output_directory: Option<PathBuf>,

    /// What to download from each post.
    #[arg(short, long, value_enum)]
    pub mode: Option<DownloadModeArg>,

    /// File name for videos.
    #[arg(long)]
    pub video_name: Option<String>,

    /// Base file name for photo sets; images are saved as <stem>_<index><ext>.
    #[arg(long)]
    pub photo_name: Option<String>,

    /// File name for music.
    #[arg(long)]
    pub music_name: Option<String>,

    /// In auto mode, also download the post's music.
    #[arg(long)]
    pub with_music: bool,

    /// Save each post into a subfolder named after its id.
    #[arg(long)]
    pub per_post_folder: bool,

    /// Request signing implementation.
    #[arg(long, value_enum)]
    pub signer: Option<SignerArg>,

    /// Folder holding the signing scripts.
    #[arg(long, env = "TIKTOK_SCRIPTS_DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Node.js interpreter used to run the signing scripts.
    #[arg(long = "node", env = "TIKTOK_NODE")]
    pub node_binary: Option<String>,

    /// Don't check the signing scripts for updates.
    #[arg(long)]
    pub no_update: bool,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "TIKTOK_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI download mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownloadModeArg {
    /// Video or photo set depending on the post.
    Auto,
    /// Only the video.
    Video,
    /// Only the images of a photo post.
    Photo,
    /// Only the background music.
    Music,
}

impl From<DownloadModeArg> for DownloadMode {
    fn from(arg: DownloadModeArg) -> Self {
        match arg {
            DownloadModeArg::Auto => DownloadMode::Auto,
            DownloadModeArg::Video => DownloadMode::Video,
            DownloadModeArg::Photo => DownloadMode::Photo,
            DownloadModeArg::Music => DownloadMode::Music,
        }
    }
}

/// CLI signer argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SignerArg {
    /// Node.js signing script.
    Script,
    /// Built-in signer.
    Native,
}

impl From<SignerArg> for SignerKind {
    fn from(arg: SignerArg) -> Self {
        match arg {
            SignerArg::Script => SignerKind::Script,
            SignerArg::Native => SignerKind::Native,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    /// Returns the post links.
    pub fn merge_into_config(self, config: &mut Config) -> Vec<String> {
        if let Some(user_agent) = self.user_agent {
            config.client.user_agent = user_agent;
        }

        if let Some(timeout) = self.timeout {
            config.client.request_timeout_secs = timeout;
        }

        // Signer
        if let Some(signer) = self.signer {
            config.signer.kind = signer.into();
        }

        if let Some(dir) = self.scripts_dir {
            config.signer.scripts_dir = Some(dir);
        }

        if let Some(node) = self.node_binary {
            config.signer.node_binary = node;
        }

        if self.no_update {
            config.signer.auto_update = false;
        }

        // Options
        if let Some(dir) = self.output_directory {
            config.options.output_directory = Some(dir);
        }

        if let Some(mode) = self.mode {
            config.options.download_mode = mode.into();
        }

        if let Some(name) = self.video_name {
            config.options.video_file_name = name;
        }

        if let Some(name) = self.photo_name {
            config.options.photo_file_name = name;
        }

        if let Some(name) = self.music_name {
            config.options.music_file_name = name;
        }

        // Boolean flags (only override if set to non-default)
        if self.with_music {
            config.options.include_music = true;
        }

        if self.per_post_folder {
            config.options.per_post_folder = true;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }

        self.urls
    }
}
