//! HTTP response types for the Akeneo API client.
//!
//! This module provides the [`HttpResponse`] type and the [`PaginationInfo`]
//! links parsed from the HAL envelope of list responses.

use std::collections::HashMap;

use serde_json::Value;

/// Pagination links parsed from the `_links` section of a list response.
///
/// Akeneo list responses carry their cursors in the body:
///
/// ```json
/// {
///   "_links": {
///     "self":  {"href": "https://pim.example.com/api/rest/v1/products?limit=10"},
///     "first": {"href": "https://pim.example.com/api/rest/v1/products?limit=10"},
///     "next":  {"href": "https://pim.example.com/api/rest/v1/products?limit=10&search_after=abc"}
///   },
///   "_embedded": {"items": []}
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// URL of the page that produced this response.
    pub self_url: Option<String>,
    /// URL of the first page.
    pub first_url: Option<String>,
    /// URL of the previous page, if any.
    pub previous_url: Option<String>,
    /// URL of the next page. `None` on the last page.
    pub next_url: Option<String>,
}

impl PaginationInfo {
    /// Extracts the links from a response body.
    ///
    /// Missing or malformed links are treated as absent.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let href = |rel: &str| {
            body.get("_links")
                .and_then(|links| links.get(rel))
                .and_then(|link| link.get("href"))
                .and_then(Value::as_str)
                .filter(|href| !href.is_empty())
                .map(String::from)
        };

        Self {
            self_url: href("self"),
            first_url: href("first"),
            previous_url: href("previous"),
            next_url: href("next"),
        }
    }
}

/// An HTTP response from the PIM.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
    /// Pagination links from the body envelope.
    pub pagination: PaginationInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing pagination links from the body.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let pagination = PaginationInfo::from_body(&body);
        Self {
            code,
            headers,
            body,
            pagination,
        }
    }

    /// Parses a raw response body.
    ///
    /// - empty text becomes `{}`
    /// - a JSON document is returned as-is
    /// - newline-delimited JSON (bulk PATCH responses) becomes an array with
    ///   one element per line
    /// - anything else is wrapped as `{"raw_body": text}`
    #[must_use]
    pub fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Object(serde_json::Map::new());
        }

        if let Ok(value) = serde_json::from_str::<Value>(text) {
            return value;
        }

        let lines: Result<Vec<Value>, _> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Value>)
            .collect();

        lines.map_or_else(
            |_| serde_json::json!({ "raw_body": text }),
            Value::Array,
        )
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the items of a list response (`_embedded.items`).
    #[must_use]
    pub fn embedded_items(&self) -> Option<&Vec<Value>> {
        self.body
            .get("_embedded")
            .and_then(|embedded| embedded.get("items"))
            .and_then(Value::as_array)
    }

    /// Returns the `Location` header, set by the PIM when a PATCH creates a resource.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
