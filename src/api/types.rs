//! Request and response types for the page and detail endpoints.

use serde::Deserialize;

/// A fetched post page after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the request ended up at.
    pub resolved_url: String,
    pub html: String,
}

/// Detail request with its signature, ready to send once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub base: String,
    pub query: String,
    pub token: String,
}

impl SignedRequest {
    /// The unsigned URL, which is what the signer hashes.
    pub fn unsigned_url(&self) -> String {
        format!("{}?{}", self.base, self.query)
    }

    /// Final URL with the `X-Bogus` token appended.
    pub fn url(&self) -> String {
        format!("{}?{}&X-Bogus={}", self.base, self.query, self.token)
    }
}

/// Status envelope of the detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailStatus {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_url_layout() {
        let request = SignedRequest {
            base: "https://www.tiktok.com/api/item/detail/".to_string(),
            query: "aid=1988&itemId=1".to_string(),
            token: "DFSzswVOabc".to_string(),
        };

        assert_eq!(
            request.unsigned_url(),
            "https://www.tiktok.com/api/item/detail/?aid=1988&itemId=1"
        );
        assert_eq!(
            request.url(),
            "https://www.tiktok.com/api/item/detail/?aid=1988&itemId=1&X-Bogus=DFSzswVOabc"
        );
    }

    #[test]
    fn test_detail_status_defaults() {
        let status: DetailStatus = serde_json::from_str(r#"{"itemInfo":{}}"#).unwrap();
        assert_eq!(status.status_code, 0);

        let status: DetailStatus =
            serde_json::from_str(r#"{"statusCode":10204,"statusMsg":"item doesn't exist"}"#)
                .unwrap();
        assert_eq!(status.status_code, 10204);
        assert_eq!(status.status_msg.as_deref(), Some("item doesn't exist"));
    }
}
