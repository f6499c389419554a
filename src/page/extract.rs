//! Embedded JSON extraction from post pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

/// Id of the script element carrying the rehydration payload.
pub const PAYLOAD_SCRIPT_ID: &str = "__UNIVERSAL_DATA_FOR_REHYDRATION__";

static PAYLOAD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("script#{}", PAYLOAD_SCRIPT_ID)).unwrap()
});

/// Return the text of the rehydration script element, if the page has one.
///
/// The HTML parser is error tolerant, so malformed markup simply yields `None`
/// when the element cannot be found.
pub fn extract_embedded_json(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let node = document.select(&PAYLOAD_SELECTOR).next()?;
    let text: String = node.text().collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_payload() {
        let html = r#"<html><head>
            <script id="other">{"x":1}</script>
            <script id="__UNIVERSAL_DATA_FOR_REHYDRATION__" type="application/json">{"__DEFAULT_SCOPE__":{}}</script>
            </head><body></body></html>"#;

        assert_eq!(
            extract_embedded_json(html).as_deref(),
            Some(r#"{"__DEFAULT_SCOPE__":{}}"#)
        );
    }

    #[test]
    fn test_missing_node_is_none() {
        assert!(extract_embedded_json("<html><body><p>hello</p></body></html>").is_none());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        assert!(extract_embedded_json("<html><script id=\"__UNIV").is_none());
        assert!(extract_embedded_json("").is_none());
        assert!(extract_embedded_json("<<<>>></div></script>").is_none());
    }

    #[test]
    fn test_empty_node_is_none() {
        let html = r#"<script id="__UNIVERSAL_DATA_FOR_REHYDRATION__">  </script>"#;
        assert!(extract_embedded_json(html).is_none());
    }
}
