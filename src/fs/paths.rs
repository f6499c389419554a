//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;

/// Default location of the signing scripts: the platform data directory,
/// or `./scripts` when no home directory is available.
pub fn default_scripts_dir() -> PathBuf {
    ProjectDirs::from("", "", "tiktok-downloader")
        .map(|dirs| dirs.data_dir().join("scripts"))
        .unwrap_or_else(|| PathBuf::from("scripts"))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
