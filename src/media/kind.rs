//! Content kind classification from resolved post URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static POST_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/@[^/]+/(?P<kind>photo|video)/(?P<id>\d+)").unwrap());

/// Which detail shape a post uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Video,
    Photo,
    Unknown,
}

fn url_path(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl ContentKind {
    /// Classify a URL by its path, e.g. `/@user/photo/123`.
    pub fn from_url(url: &str) -> Self {
        let path = url_path(url);

        match POST_PATH
            .captures(&path)
            .and_then(|c| c.name("kind"))
            .map(|m| m.as_str())
        {
            Some("video") => ContentKind::Video,
            Some("photo") => ContentKind::Photo,
            _ => ContentKind::Unknown,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Video => write!(f, "video"),
            ContentKind::Photo => write!(f, "photo"),
            ContentKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A post link and where it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReference {
    pub requested_url: String,
    pub resolved_url: String,
    pub kind: ContentKind,
}

impl ContentReference {
    pub fn new(requested_url: impl Into<String>, resolved_url: impl Into<String>) -> Self {
        let resolved_url = resolved_url.into();
        Self {
            requested_url: requested_url.into(),
            kind: ContentKind::from_url(&resolved_url),
            resolved_url,
        }
    }

    /// Numeric post id from the resolved URL.
    pub fn post_id(&self) -> Option<String> {
        POST_PATH
            .captures(&url_path(&self.resolved_url))
            .and_then(|c| c.name("id"))
            .map(|m| m.as_str().to_string())
    }
}
