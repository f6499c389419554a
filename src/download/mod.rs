//! Download module for post content.
//!
//! This module provides:
//! - Post resolution (page, payload, signed detail request)
//! - Video, photo set and music flows
//! - Media file streaming and audio tagging
//! - Download state tracking

pub mod audio;
pub mod media;
pub mod post;
pub mod resolve;
pub mod state;

pub use audio::tag_audio;
pub use media::download_asset;
pub use post::{download_music, download_photos, download_post, download_video};
pub use resolve::{resolve_post, ResolvedPost};
pub use state::{DownloadState, GlobalState};
