//! Configuration validation logic.

use std::sync::LazyLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::fs::sanitize_filename;
use regex::Regex;

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 10;

/// Canonical post URL: `https://www.tiktok.com/@handle/video/123`.
static POST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.|m\.)?tiktok\.com/@[^/\s]+/(video|photo)/\d+").unwrap()
});

/// Short share links that redirect to a post URL.
static SHORT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://(vm|vt)\.tiktok\.com/[A-Za-z0-9]+/?").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.client.user_agent)?;
    validate_timeout("connect_timeout_secs", config.client.connect_timeout_secs)?;
    validate_timeout("request_timeout_secs", config.client.request_timeout_secs)?;
    validate_timeout("signer.timeout_secs", config.signer.timeout_secs)?;

    url::Url::parse(&config.client.api_base).map_err(|e| Error::ConfigValidation {
        field: "api_base".to_string(),
        message: e.to_string(),
    })?;

    for (field, name) in [
        ("video_file_name", &config.options.video_file_name),
        ("photo_file_name", &config.options.photo_file_name),
        ("music_file_name", &config.options.music_file_name),
    ] {
        sanitize_filename(name).map_err(|e| Error::ConfigValidation {
            field: field.to_string(),
            message: e.to_string(),
        })?;
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent must not be empty".to_string(),
        });
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    Ok(())
}

fn validate_timeout(field: &str, secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Timeout must be at least one second".to_string(),
        });
    }
    Ok(())
}

/// Check that `input` looks like a TikTok post link and return it trimmed.
pub fn parse_post_url(input: &str) -> Result<String> {
    let input = input.trim();

    if POST_URL.is_match(input) || SHORT_URL.is_match(input) {
        return Ok(input.to_string());
    }

    Err(Error::InvalidLink(format!(
        "'{}' is not a TikTok post link. Expected https://www.tiktok.com/@user/video/<id>",
        input
    )))
}
