//! # Response Formatting
//!
//! List response body and the `Link` header pointing at the next page.

use serde::Serialize;

use super::parser::{ListParams, MAX_ITEMS, TOKEN};
use crate::query::QueryType;

/// List response with cursor pagination
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_items: Option<usize>,
    pub has_more_items: bool,
    /// Present iff `has_more_items`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T: Serialize> ListResponse<T> {
    /// Count-only page for `max_items=0`
    pub fn count_only(total: usize) -> Self {
        Self {
            items: Vec::new(),
            num_items: Some(total),
            has_more_items: false,
            token: None,
        }
    }
}

/// `Link` header value for the next page.
///
/// Filters that were supplied are carried over so that following the
/// link keeps listing the same result set.
pub fn next_link(path: &str, params: &ListParams, page_size: usize, token: &str) -> String {
    let mut url = format!(
        "{}?{}={}&{}={}",
        path,
        MAX_ITEMS,
        page_size,
        TOKEN,
        encode_query_value(token)
    );
    for query_type in [QueryType::Field, QueryType::Label] {
        if let Some(expr) = params.expression(query_type) {
            url.push('&');
            url.push_str(query_type.param_name());
            url.push('=');
            url.push_str(&encode_query_value(expr));
        }
    }
    format!("<{}>; rel=\"next\"", url)
}

/// Percent-encode a query-string value. Unreserved characters pass through.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_serialization() {
        let response = ListResponse {
            items: vec![json!({"id": "1"})],
            num_items: Some(4),
            has_more_items: true,
            token: Some("dG9r".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["id"], "1");
        assert_eq!(json["num_items"], 4);
        assert_eq!(json["has_more_items"], true);
        assert_eq!(json["token"], "dG9r");
    }

    #[test]
    fn test_last_page_has_no_token() {
        let response: ListResponse<serde_json::Value> = ListResponse {
            items: vec![],
            num_items: None,
            has_more_items: false,
            token: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("token").is_none());
        assert!(json.get("num_items").is_none());
    }

    #[test]
    fn test_count_only() {
        let json = serde_json::to_value(ListResponse::<()>::count_only(7)).unwrap();
        assert_eq!(json, json!({"items": [], "num_items": 7, "has_more_items": false}));
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("abc-_.~"), "abc-_.~");
        assert_eq!(encode_query_value("a+b/c="), "a%2Bb%2Fc%3D");
        assert_eq!(encode_query_value("name = x|y"), "name%20%3D%20x%7Cy");
    }

    #[test]
    fn test_next_link() {
        let params = ListParams {
            label_query: Some("env = dev".to_string()),
            ..ListParams::default()
        };
        assert_eq!(
            next_link("/v1/platforms", &params, 2, "MjA+"),
            "</v1/platforms?max_items=2&token=MjA%2B&labelQuery=env%20%3D%20dev>; rel=\"next\""
        );
    }
}
