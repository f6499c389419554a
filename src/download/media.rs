//! Media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::TikTokApi;
use crate::error::{Error, Result};
use crate::fs::ensure_dir;
use crate::media::MediaAsset;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Suffix of the file a download is streamed into before it is complete.
const PARTIAL_SUFFIX: &str = ".part";

/// In-progress download file, removed unless [`PartialFile::commit`] renames it
/// onto its final name. Dropping it mid-stream (e.g. on cancellation) leaves
/// the final path untouched.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn new(output_path: &Path) -> Self {
        let mut name = output_path.as_os_str().to_owned();
        name.push(PARTIAL_SUFFIX);
        Self {
            path: PathBuf::from(name),
            committed: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Replace `output_path` with the finished download.
    async fn commit(mut self, output_path: &Path) -> Result<()> {
        tokio::fs::rename(&self.path, output_path).await?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed && self.path.exists() {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Download an asset into `target_dir`, replacing any existing file of the
/// same name. A failed download keeps the existing file.
pub async fn download_asset(
    api: &TikTokApi,
    asset: &MediaAsset,
    target_dir: &Path,
    show_progress: bool,
) -> Result<PathBuf> {
    ensure_dir(target_dir)
        .await
        .map_err(|e| Error::asset(&asset.file_name, e))?;

    let output_path = target_dir.join(&asset.file_name);
    let partial = PartialFile::new(&output_path);

    download_direct(api, &asset.url, partial.path(), show_progress)
        .await
        .map_err(|e| Error::asset(&asset.file_name, e))?;

    partial
        .commit(&output_path)
        .await
        .map_err(|e| Error::asset(&asset.file_name, e))?;

    tracing::debug!("Downloaded {}: {}", asset.role, output_path.display());
    Ok(output_path)
}

/// Stream a response body to a file.
async fn download_direct(
    api: &TikTokApi,
    url: &str,
    output_path: &Path,
    show_downloads: bool,
) -> Result<()> {
    let response = api.download_file(url).await?;

    let content_length = response.content_length();
    let show_progress =
        show_downloads && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false);

    let progress = if show_progress {
        Some(create_download_bar(content_length.unwrap_or(0)))
    } else {
        None
    };

    // Stream to file
    let mut file = File::create(output_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path_appends_suffix() {
        let partial = PartialFile::new(Path::new("out/video.mp4"));
        assert_eq!(partial.path(), Path::new("out/video.mp4.part"));
    }

    #[test]
    fn test_dropped_partial_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("video.mp4");
        std::fs::write(&output, b"PREVIOUS").unwrap();

        let partial = PartialFile::new(&output);
        std::fs::write(partial.path(), b"TRUNC").unwrap();
        let partial_path = partial.path().to_path_buf();
        drop(partial);

        assert!(!partial_path.exists());
        assert_eq!(std::fs::read(&output).unwrap(), b"PREVIOUS");
    }

    #[tokio::test]
    async fn test_commit_replaces_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("video.mp4");
        std::fs::write(&output, b"PREVIOUS").unwrap();

        let partial = PartialFile::new(&output);
        std::fs::write(partial.path(), b"NEW").unwrap();
        let partial_path = partial.path().to_path_buf();
        partial.commit(&output).await.unwrap();

        assert!(!partial_path.exists());
        assert_eq!(std::fs::read(&output).unwrap(), b"NEW");
    }
}
