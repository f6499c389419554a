//! TikTok HTTP client.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::api::query::build_query_params;
use crate::api::signer::Signer;
use crate::api::types::{DetailStatus, FetchedPage, SignedRequest};
use crate::config::{Config, FingerprintConfig};
use crate::error::{Error, Result};
use crate::page::PageContext;

/// Client for post pages, the signed detail endpoint and media CDNs.
pub struct TikTokApi {
    client: Client,
    user_agent: String,
    api_base: String,
    fingerprint: FingerprintConfig,
    signer: Arc<dyn Signer>,
    history_len: AtomicU32,
    /// Deadline for page, detail and cover requests. Media streams are only
    /// bounded by the client's idle read timeout.
    request_timeout: Duration,
}

impl TikTokApi {
    /// Create a client from configuration with the given signer.
    pub fn new(config: &Config, signer: Arc<dyn Signer>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header_value("accept_language", &config.client.accept_language)?,
        );
        headers.insert(
            header::REFERER,
            header_value("referer", &config.client.referer)?,
        );

        let client = Client::builder()
            .user_agent(&config.client.user_agent)
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.client.user_agent.clone(),
            api_base: config.client.api_base.clone(),
            fingerprint: config.fingerprint.clone(),
            signer,
            history_len: AtomicU32::new(0),
            request_timeout: config.request_timeout(),
        })
    }

    /// Underlying HTTP client, shared by every request of this process.
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn signer_name(&self) -> &'static str {
        self.signer.name()
    }

    /// Fetch a post page, following redirects.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| Error::PageFetch(format!("{}: {}", url, e)))?;

        let resolved_url = response.url().to_string();
        tracing::debug!("Resolved to {}", resolved_url);

        let html = response
            .text()
            .await
            .map_err(|e| Error::PageFetch(format!("{}: {}", url, e)))?;

        Ok(FetchedPage { resolved_url, html })
    }

    /// Build and sign the detail request for a page payload.
    ///
    /// Each call advances the history counter, so consecutive requests from
    /// one client look like one browsing session.
    pub async fn sign_request(&self, ctx: &PageContext) -> Result<SignedRequest> {
        let history_len = self.history_len.fetch_add(1, Ordering::Relaxed);
        let params = build_query_params(ctx, &self.user_agent, &self.fingerprint, history_len);

        let mut request = SignedRequest {
            base: self.api_base.clone(),
            query: params.to_query_string(),
            token: String::new(),
        };

        request.token = self
            .signer
            .sign(&request.unsigned_url(), &self.user_agent)
            .await?;

        tracing::debug!("Signed detail request with {} signer", self.signer.name());
        Ok(request)
    }

    /// Fetch the detail JSON for a signed request.
    pub async fn fetch_detail(&self, request: &SignedRequest) -> Result<Value> {
        let url = request.url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| Error::PageFetch(format!("detail request failed: {}", e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| Error::PageFetch(format!("detail request failed: {}", e)))?;
        tracing::debug!("Detail response length: {} bytes", text.len());

        let detail: Value = serde_json::from_str(&text)?;

        if let Ok(status) = DetailStatus::deserialize(&detail) {
            if status.status_code != 0 {
                tracing::warn!(
                    "Detail endpoint returned status {}: {}",
                    status.status_code,
                    status.status_msg.as_deref().unwrap_or("no message")
                );
            }
        }

        Ok(detail)
    }

    /// Fetch a small resource fully into memory.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Start downloading a media file; the body is left to the caller.
    ///
    /// No overall deadline applies, only the idle read timeout, so large
    /// files may take as long as they keep making progress.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response)
    }
}

fn header_value(field: &str, value: &str) -> Result<header::HeaderValue> {
    header::HeaderValue::from_str(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: e.to_string(),
    })
}
