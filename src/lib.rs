//! TikTok Downloader - download videos, photo sets and music from TikTok posts
//!
//! This library provides functionality for resolving a TikTok post link into
//! its media and saving it to disk.
//!
//! # Features
//!
//! - Embedded page payload extraction
//! - Signed item detail requests (Node.js script or built-in signer)
//! - Video, photo set and music downloads
//! - ID3 tagging of music with title, author and cover
//! - Short link resolution through redirects
//!
//! # Example
//!
//! ```no_run
//! use tiktok_downloader::{download_post, signer_from_config, Config, TikTokApi};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = TikTokApi::new(&config, signer_from_config(&config))?;
//!
//!     let state = download_post(
//!         &api,
//!         &config,
//!         "https://www.tiktok.com/@user/video/7300000000000000000",
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//!     println!("{} files saved", state.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod page;

// Re-exports for convenience
pub use api::{signer_from_config, Signer, TikTokApi};
pub use config::{Config, DownloadMode, SignerKind};
pub use download::{
    download_music, download_photos, download_post, download_video, resolve_post,
    DownloadState, GlobalState,
};
pub use error::{Error, Result};
pub use media::{ContentKind, MediaAsset, MusicInfo};
pub use page::PageContext;
