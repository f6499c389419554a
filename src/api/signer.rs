//! Request signing capability.
//!
//! The detail endpoint rejects requests without an `X-Bogus` token derived from
//! the full request URL and the user agent. The token generator sits behind the
//! [`Signer`] trait so the external Node.js script and the built-in
//! implementation are interchangeable.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::api::xbogus::XBogusSigner;
use crate::config::{Config, SignerKind};
use crate::error::{Error, Result};

/// Entry script invoked by [`ScriptSigner`].
pub const ENTRY_SCRIPT: &str = "index.js";

/// Produces the signature token for a request URL.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign `query` (API base plus serialized query) for `user_agent`.
    async fn sign(&self, query: &str, user_agent: &str) -> Result<String>;

    /// Short name for log output.
    fn name(&self) -> &'static str;
}

/// Signs by running `node index.js <query> <user-agent>` and reading stdout.
#[derive(Debug, Clone)]
pub struct ScriptSigner {
    node_binary: String,
    scripts_dir: PathBuf,
    timeout: Duration,
}

impl ScriptSigner {
    pub fn new(node_binary: impl Into<String>, scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            node_binary: node_binary.into(),
            scripts_dir: scripts_dir.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn script_path(&self) -> PathBuf {
        self.scripts_dir.join(ENTRY_SCRIPT)
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }
}

#[async_trait]
impl Signer for ScriptSigner {
    async fn sign(&self, query: &str, user_agent: &str) -> Result<String> {
        let script = self.script_path();
        if !script.is_file() {
            return Err(Error::SigningUnavailable(format!(
                "signing script not found at {}",
                script.display()
            )));
        }

        tracing::debug!("Signing with {} {}", self.node_binary, script.display());

        let child = Command::new(&self.node_binary)
            .arg(&script)
            .arg(query)
            .arg(user_agent)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::SigningUnavailable(format!("failed to start {}: {}", self.node_binary, e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::SigningUnavailable(format!(
                    "signing script did not finish within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::SigningUnavailable(format!("signing script failed: {}", e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::warn!("Signing script stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(Error::SigningUnavailable(format!(
                "signing script exited with {}",
                output.status
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(Error::SigningUnavailable(
                "signing script produced no token".to_string(),
            ));
        }

        Ok(token)
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

/// Build the signer selected in the configuration.
pub fn signer_from_config(config: &Config) -> Arc<dyn Signer> {
    match config.signer.kind {
        SignerKind::Script => Arc::new(
            ScriptSigner::new(config.signer.node_binary.clone(), config.scripts_directory())
                .with_timeout(Duration::from_secs(config.signer.timeout_secs)),
        ),
        SignerKind::Native => Arc::new(XBogusSigner::new()),
    }
}
