//! Loosely typed page payload with optional path access.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::page::extract::extract_embedded_json;

/// Root scope of the rehydration payload.
pub const DEFAULT_SCOPE: &str = "__DEFAULT_SCOPE__";

/// Optional lookups through a JSON document.
///
/// Each path segment indexes an object by key, or an array by position when
/// the segment parses as an integer. A missing segment anywhere yields `None`.
pub trait JsonPath {
    fn at(&self, path: &[&str]) -> Option<&Value>;

    fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.at(path).and_then(Value::as_str)
    }

    fn array_at(&self, path: &[&str]) -> Option<&Vec<Value>> {
        self.at(path).and_then(Value::as_array)
    }

    /// Render a scalar as text; absent, null and container values become "".
    fn display_at(&self, path: &[&str]) -> String {
        match self.at(path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl JsonPath for Value {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, segment| match node {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

/// Parsed `__UNIVERSAL_DATA_FOR_REHYDRATION__` payload of a post page.
#[derive(Debug, Clone)]
pub struct PageContext {
    root: Value,
}

impl PageContext {
    /// Extract and parse the embedded payload from a page.
    pub fn from_html(html: &str) -> Result<Self> {
        let json = extract_embedded_json(html).ok_or(Error::JsonNotFound)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self {
            root: serde_json::from_str(json)?,
        })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    /// `webapp.app-context` holds the device and experiment identifiers.
    pub fn app_context(&self) -> Option<&Value> {
        self.root.at(&[DEFAULT_SCOPE, "webapp.app-context"])
    }

    /// Canonical post URL from the SEO block.
    pub fn canonical(&self) -> Option<&str> {
        self.root.str_at(&[DEFAULT_SCOPE, "seo.abtest", "canonical"])
    }

    /// Post detail embedded directly in the page, when the page carries one.
    pub fn video_detail(&self) -> Option<&Value> {
        self.root.at(&[DEFAULT_SCOPE, "webapp.video-detail"])
    }
}

impl JsonPath for PageContext {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        self.root.at(path)
    }
}
