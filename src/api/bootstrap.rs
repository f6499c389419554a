//! Startup check of the external signing scripts.

use std::fmt;
use std::path::Path;

use reqwest::Client;

use crate::api::signer::ENTRY_SCRIPT;

/// Scripts the Node.js signer needs next to each other.
pub const SIGNING_SCRIPTS: [&str; 2] = [ENTRY_SCRIPT, "xbogus.js"];

/// Result of checking one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Local copy matches the remote one.
    UpToDate,
    /// Script was missing and has been fetched.
    Downloaded,
    /// Local copy differed and has been replaced.
    Updated,
    /// Remote copy could not be checked; a local copy is kept.
    Unverified(String),
    /// Script is missing and could not be fetched.
    Failed(String),
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptStatus::UpToDate => write!(f, "up to date"),
            ScriptStatus::Downloaded => write!(f, "downloaded"),
            ScriptStatus::Updated => write!(f, "updated"),
            ScriptStatus::Unverified(e) => write!(f, "kept local copy ({})", e),
            ScriptStatus::Failed(e) => write!(f, "failed ({})", e),
        }
    }
}

/// Outcome of [`ensure_signing_scripts`].
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    pub scripts: Vec<(String, ScriptStatus)>,
}

impl BootstrapReport {
    /// Whether every script is present locally after the check.
    pub fn is_usable(&self) -> bool {
        self.scripts
            .iter()
            .all(|(_, status)| !matches!(status, ScriptStatus::Failed(_)))
    }
}

/// Make sure the signing scripts exist in `dir` and match the copies at `base_url`.
///
/// Never fails: every problem is logged and recorded in the report so a
/// previously downloaded copy stays usable offline.
pub async fn ensure_signing_scripts(client: &Client, dir: &Path, base_url: &str) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::warn!("Cannot create scripts directory {}: {}", dir.display(), e);
    }

    for name in SIGNING_SCRIPTS {
        let remote_url = format!("{}/{}", base_url.trim_end_matches('/'), name);
        let local_path = dir.join(name);
        let status = check_script(client, &remote_url, &local_path).await;

        match &status {
            ScriptStatus::UpToDate => tracing::debug!("Signing script {} is up to date", name),
            ScriptStatus::Downloaded | ScriptStatus::Updated => {
                tracing::info!("Signing script {} {}", name, status)
            }
            ScriptStatus::Unverified(_) | ScriptStatus::Failed(_) => {
                tracing::warn!("Signing script {}: {}", name, status)
            }
        }

        report.scripts.push((name.to_string(), status));
    }

    report
}

async fn check_script(client: &Client, remote_url: &str, local_path: &Path) -> ScriptStatus {
    let local = tokio::fs::read_to_string(local_path).await.ok();

    let remote = match fetch_text(client, remote_url).await {
        Ok(text) => text,
        Err(e) => {
            return match local {
                Some(_) => ScriptStatus::Unverified(e),
                None => ScriptStatus::Failed(e),
            };
        }
    };

    if let Some(local) = &local {
        if local.trim() == remote.trim() {
            return ScriptStatus::UpToDate;
        }
    }

    if let Err(e) = tokio::fs::write(local_path, &remote).await {
        let message = format!("cannot write {}: {}", local_path.display(), e);
        return match local {
            Some(_) => ScriptStatus::Unverified(message),
            None => ScriptStatus::Failed(message),
        };
    }

    if local.is_some() {
        ScriptStatus::Updated
    } else {
        ScriptStatus::Downloaded
    }
}

async fn fetch_text(client: &Client, url: &str) -> std::result::Result<String, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status));
    }
    response.text().await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_usable_unless_failed() {
        let mut report = BootstrapReport::default();
        report.scripts.push(("index.js".into(), ScriptStatus::UpToDate));
        report
            .scripts
            .push(("xbogus.js".into(), ScriptStatus::Unverified("offline".into())));
        assert!(report.is_usable());

        report
            .scripts
            .push(("extra.js".into(), ScriptStatus::Failed("offline".into())));
        assert!(!report.is_usable());
    }

    #[tokio::test]
    async fn test_offline_keeps_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.js"), "local").unwrap();

        let client = Client::new();
        // Port 9 (discard) on localhost refuses connections.
        let report = ensure_signing_scripts(&client, dir.path(), "http://127.0.0.1:9").await;

        assert!(matches!(report.scripts[0].1, ScriptStatus::Unverified(_)));
        assert!(matches!(report.scripts[1].1, ScriptStatus::Failed(_)));
        assert_eq!(std::fs::read_to_string(dir.path().join("index.js")).unwrap(), "local");
    }
}
