//! Configuration module for the tiktok-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Download mode and signer selection
//! - Configuration and input validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{ClientConfig, Config, FingerprintConfig, OptionsConfig, SignerConfig};
pub use modes::{DownloadMode, SignerKind};
pub use validation::{parse_post_url, validate_config};
