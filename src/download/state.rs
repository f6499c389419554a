//! Download state tracking.

use std::path::PathBuf;

use crate::media::{AssetRole, ContentKind};

/// Per-post download state.
#[derive(Debug)]
pub struct DownloadState {
    pub url: String,
    pub kind: ContentKind,

    // Paths
    pub download_path: PathBuf,
    pub saved: Vec<PathBuf>,

    /// Files that could not be saved, with the reason.
    pub failures: Vec<(String, String)>,

    // Statistics
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
}

impl DownloadState {
    /// Create a new download state for a post.
    pub fn new(url: impl Into<String>, kind: ContentKind, download_path: PathBuf) -> Self {
        Self {
            url: url.into(),
            kind,
            download_path,
            saved: Vec::new(),
            failures: Vec::new(),
            pic_count: 0,
            vid_count: 0,
            audio_count: 0,
        }
    }

    /// Record a saved file.
    pub fn record_saved(&mut self, role: AssetRole, path: PathBuf) {
        match role {
            AssetRole::Video => self.vid_count += 1,
            AssetRole::Image(_) | AssetRole::Cover => self.pic_count += 1,
            AssetRole::Audio => self.audio_count += 1,
        }
        self.saved.push(path);
    }

    /// Record a file that failed to save.
    pub fn record_failed(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.failures.push((file.into(), reason.into()));
    }

    pub fn failed_count(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count
    }

    /// Whether nothing was saved or something failed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() || self.saved.is_empty()
    }
}

/// Global statistics across all posts.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub assets_failed: u64,
    pub posts_processed: u64,
    pub posts_failed: u64,
}

impl GlobalState {
    /// Add statistics from a post's download state.
    pub fn add_post_stats(&mut self, state: &DownloadState) {
        self.pic_count += state.pic_count;
        self.vid_count += state.vid_count;
        self.audio_count += state.audio_count;
        self.assets_failed += state.failed_count();
        self.posts_processed += 1;
        if state.is_partial() {
            self.posts_failed += 1;
        }
    }

    /// Mark a post as failed before any asset was attempted.
    pub fn mark_post_failed(&mut self) {
        self.posts_processed += 1;
        self.posts_failed += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_saved_counts_by_role() {
        let mut state = DownloadState::new("u", ContentKind::Photo, PathBuf::from("out"));
        state.record_saved(AssetRole::Image(0), PathBuf::from("out/photo_0.jpg"));
        state.record_saved(AssetRole::Image(1), PathBuf::from("out/photo_1.jpg"));
        state.record_saved(AssetRole::Audio, PathBuf::from("out/music.mp3"));

        assert_eq!(state.pic_count, 2);
        assert_eq!(state.audio_count, 1);
        assert_eq!(state.total_downloaded(), 3);
        assert!(!state.is_partial());
    }

    #[test]
    fn test_failures_make_post_partial() {
        let mut state = DownloadState::new("u", ContentKind::Video, PathBuf::from("out"));
        state.record_saved(AssetRole::Video, PathBuf::from("out/video.mp4"));
        state.record_failed("music.mp3", "404");

        assert!(state.is_partial());

        let mut global = GlobalState::default();
        global.add_post_stats(&state);
        global.mark_post_failed();
        assert_eq!(global.posts_processed, 2);
        assert_eq!(global.posts_failed, 2);
        assert_eq!(global.assets_failed, 1);
        assert_eq!(global.total_downloaded(), 1);
    }

    #[test]
    fn test_empty_post_is_partial() {
        let state = DownloadState::new("u", ContentKind::Video, PathBuf::from("out"));
        assert!(state.is_partial());
    }
}
