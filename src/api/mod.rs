//! TikTok API module.
//!
//! This module provides:
//! - HTTP client for post pages and the item detail endpoint
//! - Client fingerprint query construction
//! - Request signing (external script or built-in)
//! - Startup refresh of the signing scripts

pub mod bootstrap;
pub mod client;
pub mod query;
pub mod signer;
pub mod types;
pub mod xbogus;

pub use bootstrap::{ensure_signing_scripts, BootstrapReport, ScriptStatus};
pub use client::TikTokApi;
pub use query::{build_query_params, ClientFingerprint};
pub use signer::{signer_from_config, ScriptSigner, Signer};
pub use types::{FetchedPage, SignedRequest};
pub use xbogus::XBogusSigner;
