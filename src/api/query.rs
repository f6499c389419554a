//! Client fingerprint query parameters for the item detail endpoint.

use url::form_urlencoded;

use crate::config::FingerprintConfig;
use crate::page::{JsonPath, PageContext};

/// Ordered query parameters describing the simulated browser client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint {
    params: Vec<(&'static str, String)>,
}

impl ClientFingerprint {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serialize as `application/x-www-form-urlencoded`, keeping key order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Split a user agent into browser name and version.
///
/// `Mozilla/5.0 (Windows NT 10.0)` gives `("Mozilla", "5.0")`; without a `/`
/// the whole string is the name and the version is `unknown`.
pub fn browser_from_user_agent(user_agent: &str) -> (String, String) {
    match user_agent.split_once('/') {
        Some((name, rest)) => {
            let version = rest.split(' ').next().unwrap_or_default();
            (name.to_string(), version.to_string())
        }
        None => (user_agent.to_string(), "unknown".to_string()),
    }
}

/// Item id from a canonical URL: last path segment without its query.
pub fn item_id_from_canonical(canonical: &str) -> String {
    let last = canonical.rsplit('/').next().unwrap_or_default();
    last.split('?').next().unwrap_or_default().to_string()
}

/// Normalize a comma separated experiment list; unparsable entries become 0.
pub fn client_ab_versions(version_name: &str) -> String {
    version_name
        .split(',')
        .map(|v| v.trim().parse::<i32>().unwrap_or(0).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the detail request parameters from a page payload.
///
/// Missing payload fields never fail the build; they serialize as empty values
/// so the key set stays the same for every page.
pub fn build_query_params(
    ctx: &PageContext,
    user_agent: &str,
    fingerprint: &FingerprintConfig,
    history_len: u32,
) -> ClientFingerprint {
    let (browser_name, browser_version) = browser_from_user_agent(user_agent);

    let item_id = ctx
        .canonical()
        .map(item_id_from_canonical)
        .unwrap_or_default();

    let (web_id_last_time, device_id, odin_id, ab_versions) = match ctx.app_context() {
        Some(app) => (
            app.display_at(&["webIdCreatedTime"]),
            app.display_at(&["wid"]),
            app.display_at(&["odinId"]),
            app.str_at(&["abTestVersion", "versionName"])
                .map(client_ab_versions)
                .unwrap_or_default(),
        ),
        None => Default::default(),
    };

    let params = vec![
        ("WebIdLastTime", web_id_last_time),
        ("aid", "1988".to_string()),
        ("app_language", fingerprint.app_language.clone()),
        ("app_name", "tiktok_web".to_string()),
        ("browser_language", fingerprint.browser_language.clone()),
        ("browser_name", browser_name),
        ("browser_online", "true".to_string()),
        ("browser_platform", fingerprint.browser_platform.clone()),
        ("browser_version", browser_version),
        ("channel", "tiktok_web".to_string()),
        ("clientABVersions", ab_versions),
        ("cookie_enabled", "true".to_string()),
        ("coverFormat", "2".to_string()),
        ("data_collection_enabled", "true".to_string()),
        ("device_id", device_id),
        ("device_platform", "web_pc".to_string()),
        ("focus_state", "true".to_string()),
        ("from_page", "user".to_string()),
        ("history_len", history_len.to_string()),
        ("is_fullscreen", "false".to_string()),
        ("is_page_visible", "true".to_string()),
        ("itemId", item_id),
        ("language", fingerprint.language.clone()),
        ("odinId", odin_id),
        ("os", fingerprint.os.clone()),
        ("priority_region", fingerprint.priority_region.clone()),
        ("region", fingerprint.region.clone()),
        ("screen_height", fingerprint.screen_height.to_string()),
        ("screen_width", fingerprint.screen_width.to_string()),
        ("tz_name", fingerprint.tz_name.clone()),
        ("user_is_login", "true".to_string()),
        ("webcast_language", fingerprint.webcast_language.clone()),
    ];

    ClientFingerprint { params }
}
