//! Post resolution: page, payload, signed detail request.

use std::future::Future;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::TikTokApi;
use crate::error::{Error, Result};
use crate::media::{item_struct, ContentKind, ContentReference};
use crate::page::PageContext;

/// Everything needed to extract media from a post.
#[derive(Debug)]
pub struct ResolvedPost {
    pub reference: ContentReference,
    pub context: PageContext,
    /// Detail JSON containing `itemInfo.itemStruct`.
    pub detail: Value,
}

impl ResolvedPost {
    pub fn kind(&self) -> ContentKind {
        self.reference.kind
    }
}

/// Run `fut` unless `cancel` fires first.
pub async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}

/// Fetch a post page, classify it and fetch its signed detail.
///
/// Links that are neither a video nor a photo post fail with
/// [`Error::InvalidLink`] before any request is signed.
pub async fn resolve_post(
    api: &TikTokApi,
    url: &str,
    cancel: &CancellationToken,
) -> Result<ResolvedPost> {
    let page = cancellable(cancel, api.fetch_page(url)).await?;

    let reference = ContentReference::new(url, page.resolved_url);
    tracing::info!("{} resolved as {} post", url, reference.kind);

    if reference.kind == ContentKind::Unknown {
        return Err(Error::InvalidLink(reference.resolved_url));
    }

    let context = PageContext::from_html(&page.html)?;

    let request = cancellable(cancel, api.sign_request(&context)).await?;
    let detail = cancellable(cancel, api.fetch_detail(&request)).await?;

    let detail = if item_struct(&detail).is_none() && context.video_detail().is_some() {
        tracing::warn!("Detail response has no item data, using the page payload instead");
        context.value().clone()
    } else {
        detail
    };

    Ok(ResolvedPost {
        reference,
        context,
        detail,
    })
}
