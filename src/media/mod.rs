//! Media module for content kinds, assets and extraction.

pub mod item;
pub mod kind;
pub mod parser;

pub use item::{AssetRole, MediaAsset, MusicInfo};
pub use kind::{ContentKind, ContentReference};
pub use parser::{extract_image_urls, extract_music, extract_video_url, item_struct};
