//! Shared fixtures for integration tests: mock pages, detail documents and
//! signers.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tiktok_downloader::error::{Error, Result};
use tiktok_downloader::{Config, Signer, TikTokApi};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const DETAIL_PATH: &str = "/api/item/detail/";
pub const TOKEN: &str = "TESTTOKEN";

/// Smallest PNG signature `image::guess_format` recognizes.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

/// Signer returning a fixed token and counting calls.
#[derive(Default)]
pub struct StaticSigner {
    pub calls: AtomicUsize,
}

impl StaticSigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Signer for StaticSigner {
    async fn sign(&self, _query: &str, _user_agent: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TOKEN.to_string())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Signer whose interpreter is never available.
pub struct UnavailableSigner;

#[async_trait]
impl Signer for UnavailableSigner {
    async fn sign(&self, _query: &str, _user_agent: &str) -> Result<String> {
        Err(Error::SigningUnavailable("node not found".to_string()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// Config pointing the detail endpoint at the mock server.
pub fn test_config(server: &MockServer, output: &Path) -> Config {
    let mut config = Config::default();
    config.client.api_base = format!("{}{}", server.uri(), DETAIL_PATH);
    config.options.output_directory = Some(output.to_path_buf());
    config.options.show_downloads = false;
    config
}

pub fn test_api(config: &Config) -> (TikTokApi, Arc<StaticSigner>) {
    let signer = Arc::new(StaticSigner::default());
    let api = TikTokApi::new(config, signer.clone()).unwrap();
    (api, signer)
}

/// Wrap a payload the way post pages embed it.
pub fn embed(payload: &Value) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>TikTok</title><script id="__UNIVERSAL_DATA_FOR_REHYDRATION__" type="application/json">{}</script></head><body><div id="app"></div></body></html>"#,
        payload
    )
}

/// Page payload with an app context and, when given, a canonical URL.
pub fn page_payload(canonical: Option<&str>) -> Value {
    let mut scope = json!({
        "webapp.app-context": {
            "wid": "7300000000000000001",
            "odinId": "7300000000000000002",
            "webIdCreatedTime": "1700000000",
            "abTestVersion": {"versionName": "70508271,72437276"}
        }
    });
    if let Some(canonical) = canonical {
        scope["seo.abtest"] = json!({ "canonical": canonical });
    }
    json!({ "__DEFAULT_SCOPE__": scope })
}

pub fn page_html(canonical: Option<&str>) -> String {
    embed(&page_payload(canonical))
}

/// Music block served from the mock server.
pub fn music(base: &str, cover_path: &str) -> Value {
    json!({
        "playUrl": format!("{}/media/music.mp3", base),
        "coverLarge": format!("{}{}", base, cover_path),
        "title": "Song",
        "authorName": "Artist"
    })
}

/// Item struct of a video post with two encodings, best last.
pub fn video_item(base: &str) -> Value {
    json!({
        "id": "123",
        "video": {"bitrateInfo": [
            {"Bitrate": 400000, "PlayAddr": {"UrlList": [format!("{}/media/low.mp4", base)]}},
            {"Bitrate": 1200000, "PlayAddr": {"UrlList": [format!("{}/media/high.mp4", base)]}}
        ]},
        "music": music(base, "/media/cover.png")
    })
}

/// Item struct of a photo post with three images, the second without URLs.
pub fn photo_item(base: &str) -> Value {
    json!({
        "id": "42",
        "imagePost": {"images": [
            {"imageURL": {"urlList": [format!("{}/media/img1.jpg", base)]}},
            {"imageURL": {}},
            {"imageURL": {"urlList": [format!("{}/media/img3.jpg", base)]}}
        ]},
        "music": music(base, "/media/cover.png")
    })
}

pub fn detail(item: Value) -> Value {
    json!({
        "statusCode": 0,
        "itemInfo": {"itemStruct": item}
    })
}

/// Serve `body` to every connection one byte at a time, `interval` apart.
/// Returns the server's base URL; any path is answered.
pub async fn trickle_server(body: &'static [u8], interval: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;

                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nContent-Length: {}\r\n\r\n",
                    body.len()
                );
                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }
                for byte in body {
                    tokio::time::sleep(interval).await;
                    if socket.write_all(&[*byte]).await.is_err() {
                        return;
                    }
                    let _ = socket.flush().await;
                }
            });
        }
    });

    format!("http://{}", addr)
}
