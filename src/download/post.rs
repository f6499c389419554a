//! Per-post download flows.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::api::TikTokApi;
use crate::config::{Config, DownloadMode};
use crate::download::audio::tag_audio;
use crate::download::media::download_asset;
use crate::download::resolve::{cancellable, resolve_post, ResolvedPost};
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::fs::{indexed_file_name, sanitize_filename};
use crate::media::{
    extract_image_urls, extract_music, extract_video_url, AssetRole, ContentKind, MediaAsset,
};
use crate::output::{create_item_bar, print_error, print_success, print_warning};

/// Resolve a post and download what `options.download_mode` asks for.
///
/// Errors that stop the whole post are returned; anything else is reported
/// and recorded in the returned state.
pub async fn download_post(
    api: &TikTokApi,
    config: &Config,
    url: &str,
    cancel: &CancellationToken,
) -> Result<DownloadState> {
    let post = resolve_post(api, url, cancel).await?;

    let mut target_dir = config.output_directory();
    if config.options.per_post_folder {
        if let Some(id) = post.reference.post_id() {
            target_dir.push(id);
        }
    }

    let mut state = DownloadState::new(url, post.kind(), target_dir.clone());

    match config.options.download_mode {
        DownloadMode::Auto => {
            let primary = match post.kind() {
                ContentKind::Photo => {
                    download_photos(api, config, &post, &target_dir, &mut state, cancel).await
                }
                _ => download_video(api, config, &post, &target_dir, &mut state, cancel).await,
            };
            settle(primary, &mut state)?;

            if config.options.include_music {
                let music =
                    download_music(api, config, &post, &target_dir, &mut state, cancel).await;
                settle(music, &mut state)?;
            }
        }
        DownloadMode::Video => {
            let result = download_video(api, config, &post, &target_dir, &mut state, cancel).await;
            settle(result, &mut state)?;
        }
        DownloadMode::Photo => {
            let result =
                download_photos(api, config, &post, &target_dir, &mut state, cancel).await;
            settle(result, &mut state)?;
        }
        DownloadMode::Music => {
            let result = download_music(api, config, &post, &target_dir, &mut state, cancel).await;
            settle(result, &mut state)?;
        }
    }

    Ok(state)
}

/// Pass fatal errors up; report and record the rest.
fn settle(result: Result<()>, state: &mut DownloadState) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.aborts_post() => Err(e),
        Err(e) => {
            print_error(&format!("{}: {}", state.url, e));
            state.record_failed(state.url.clone(), e.to_string());
            Ok(())
        }
    }
}

/// Download the best encoding of a video post.
pub async fn download_video(
    api: &TikTokApi,
    config: &Config,
    post: &ResolvedPost,
    target_dir: &Path,
    state: &mut DownloadState,
    cancel: &CancellationToken,
) -> Result<()> {
    let url = extract_video_url(&post.detail, post.kind())?;
    let file_name = sanitize_filename(&config.options.video_file_name)?;
    let asset = MediaAsset::new(url, AssetRole::Video, file_name);

    save_asset(api, config, &asset, target_dir, state, cancel)
        .await
        .map(|_| ())
}

/// Download every image of a photo post, one at a time.
pub async fn download_photos(
    api: &TikTokApi,
    config: &Config,
    post: &ResolvedPost,
    target_dir: &Path,
    state: &mut DownloadState,
    cancel: &CancellationToken,
) -> Result<()> {
    let urls = extract_image_urls(&post.detail, post.kind())?;
    tracing::info!("Found {} images", urls.len());

    let progress = (config.options.show_downloads && urls.len() > 1)
        .then(|| create_item_bar(urls.len() as u64, "Images"));

    for (index, url) in urls.into_iter().enumerate() {
        let file_name =
            sanitize_filename(&indexed_file_name(&config.options.photo_file_name, index))?;
        let asset = MediaAsset::new(url, AssetRole::Image(index), file_name);

        let result = save_asset(api, config, &asset, target_dir, state, cancel).await;
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
        result?;
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(())
}

/// Download a post's music and tag it with its title, author and cover.
pub async fn download_music(
    api: &TikTokApi,
    config: &Config,
    post: &ResolvedPost,
    target_dir: &Path,
    state: &mut DownloadState,
    cancel: &CancellationToken,
) -> Result<()> {
    if post.kind() == ContentKind::Unknown {
        return Err(Error::InvalidLink(post.reference.resolved_url.clone()));
    }

    let music = extract_music(&post.detail)
        .ok_or_else(|| Error::MediaNotFound("post has no music".to_string()))?;
    let asset = MediaAsset::new(
        music.play_url.as_str(),
        AssetRole::Audio,
        sanitize_filename(&config.options.music_file_name)?,
    );

    let Some(path) = save_asset(api, config, &asset, target_dir, state, cancel).await? else {
        return Ok(());
    };

    let cover = match music.cover_url.as_deref() {
        Some(cover_url) => match cancellable(cancel, api.fetch_bytes(cover_url)).await {
            Ok(bytes) => Some(bytes),
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                tracing::warn!("Could not fetch music cover {}: {}", cover_url, e);
                None
            }
        },
        None => None,
    };

    let tag_path = path.clone();
    let tagged =
        tokio::task::spawn_blocking(move || tag_audio(&tag_path, &music, cover.as_deref())).await;

    match tagged {
        Ok(Ok(())) => tracing::debug!("Tagged {}", path.display()),
        Ok(Err(e)) => print_warning(&format!("Saved {} without tags: {}", path.display(), e)),
        Err(e) => print_warning(&format!("Saved {} without tags: {}", path.display(), e)),
    }

    Ok(())
}

/// Download one asset, recording the outcome. Only cancellation is returned
/// as an error; `Ok(None)` means the asset failed and was reported.
async fn save_asset(
    api: &TikTokApi,
    config: &Config,
    asset: &MediaAsset,
    target_dir: &Path,
    state: &mut DownloadState,
    cancel: &CancellationToken,
) -> Result<Option<PathBuf>> {
    let result = cancellable(
        cancel,
        download_asset(api, asset, target_dir, config.options.show_downloads),
    )
    .await;

    match result {
        Ok(path) => {
            print_success(&format!("Saved {} to {}", asset.role, path.display()));
            state.record_saved(asset.role, path.clone());
            Ok(Some(path))
        }
        Err(Error::Cancelled) => Err(Error::Cancelled),
        Err(e) => {
            print_error(&format!("Could not save {}: {}", asset.role, e));
            state.record_failed(&asset.file_name, e.to_string());
            Ok(None)
        }
    }
}
