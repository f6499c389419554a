//! Signing script refresh against a mock script host.

use reqwest::Client;
use tempfile::TempDir;
use tiktok_downloader::api::{ensure_signing_scripts, ScriptStatus};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_script(server: &MockServer, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/scripts/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn status_of<'a>(scripts: &'a [(String, ScriptStatus)], name: &str) -> &'a ScriptStatus {
    &scripts.iter().find(|(n, _)| n == name).unwrap().1
}

#[tokio::test]
async fn test_missing_scripts_are_downloaded() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    serve_script(&server, "index.js", "console.log('sign');").await;
    serve_script(&server, "xbogus.js", "module.exports = {};").await;

    let base = format!("{}/scripts", server.uri());
    let report = ensure_signing_scripts(&Client::new(), dir.path(), &base).await;

    assert!(report.is_usable());
    assert_eq!(status_of(&report.scripts, "index.js"), &ScriptStatus::Downloaded);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("xbogus.js")).unwrap(),
        "module.exports = {};"
    );
}

#[tokio::test]
async fn test_changed_script_is_replaced_and_same_one_kept() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.js"), "old\n").unwrap();
    std::fs::write(dir.path().join("xbogus.js"), "same\n").unwrap();
    serve_script(&server, "index.js", "new").await;
    serve_script(&server, "xbogus.js", "same").await;

    let base = format!("{}/scripts/", server.uri());
    let report = ensure_signing_scripts(&Client::new(), dir.path(), &base).await;

    assert_eq!(status_of(&report.scripts, "index.js"), &ScriptStatus::Updated);
    assert_eq!(status_of(&report.scripts, "xbogus.js"), &ScriptStatus::UpToDate);
    assert_eq!(std::fs::read_to_string(dir.path().join("index.js")).unwrap(), "new");
    // Trimmed contents match, so the local copy is untouched
    assert_eq!(std::fs::read_to_string(dir.path().join("xbogus.js")).unwrap(), "same\n");
}

#[tokio::test]
async fn test_unreachable_host_without_local_copy_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let base = format!("{}/scripts", server.uri());
    let report = ensure_signing_scripts(&Client::new(), dir.path(), &base).await;

    assert!(!report.is_usable());
    assert!(matches!(
        status_of(&report.scripts, "index.js"),
        ScriptStatus::Failed(_)
    ));
}
