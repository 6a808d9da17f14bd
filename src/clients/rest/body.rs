//! PATCH bodies: single JSON documents and newline-delimited collections.

use serde_json::Value;

/// A newline-delimited collection of JSON objects for bulk PATCH.
///
/// The text is sent byte-for-byte with the
/// `application/vnd.akeneo.collection+json` content type.
///
/// # Example
///
/// ```rust
/// use akeneo_api::clients::rest::CollectionBody;
/// use serde_json::json;
///
/// let body = CollectionBody::from_items(&[
///     json!({"identifier": "sku-1", "enabled": true}),
///     json!({"identifier": "sku-2", "enabled": false}),
/// ]);
///
/// assert_eq!(
///     body.as_str(),
///     "{\"enabled\":true,\"identifier\":\"sku-1\"}\n{\"enabled\":false,\"identifier\":\"sku-2\"}"
/// );
/// assert_eq!(body.line_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionBody(String);

impl CollectionBody {
    /// Serializes each item on its own line.
    #[must_use]
    pub fn from_items(items: &[Value]) -> Self {
        Self(
            items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Wraps already formatted collection text without touching it.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the collection text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of non-empty lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.0.lines().filter(|line| !line.trim().is_empty()).count()
    }

    /// Consumes the body, returning the collection text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Body of a PATCH request.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchBody {
    /// A single JSON document sent as `application/json`.
    Json(Value),
    /// A collection sent as `application/vnd.akeneo.collection+json`.
    Collection(CollectionBody),
}

impl From<Value> for PatchBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<CollectionBody> for PatchBody {
    fn from(body: CollectionBody) -> Self {
        Self::Collection(body)
    }
}

/// Returns the lines of a collection response whose `status_code` is not 2xx.
///
/// A bulk PATCH answers 200 as a whole and reports one status per line:
///
/// ```json
/// {"line":1,"identifier":"sku-1","status_code":204}
/// {"line":2,"identifier":"sku-2","status_code":422,"message":"Validation failed."}
/// ```
#[must_use]
pub fn failed_lines(body: &Value) -> Vec<&Value> {
    body.as_array()
        .map(|lines| {
            lines
                .iter()
                .filter(|line| {
                    line.get("status_code")
                        .and_then(Value::as_u64)
                        .is_some_and(|code| !(200..300).contains(&code))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_collection_is_untouched() {
        let text = "{\"code\":\"a\"}\n{\"code\":\"b\"}\n";
        let body = CollectionBody::raw(text);
        assert_eq!(body.as_str(), text);
        assert_eq!(body.line_count(), 2);
        assert_eq!(body.into_string(), text);
    }

    #[test]
    fn test_empty_collection() {
        let body = CollectionBody::from_items(&[]);
        assert_eq!(body.as_str(), "");
        assert_eq!(body.line_count(), 0);
    }

    #[test]
    fn test_patch_body_conversions() {
        assert_eq!(
            PatchBody::from(json!({"family": "shoes"})),
            PatchBody::Json(json!({"family": "shoes"}))
        );
        assert!(matches!(
            PatchBody::from(CollectionBody::raw("{}")),
            PatchBody::Collection(_)
        ));
    }

    #[test]
    fn test_failed_lines_selects_non_2xx() {
        let body = json!([
            {"line": 1, "identifier": "sku-1", "status_code": 204},
            {"line": 2, "identifier": "sku-2", "status_code": 422, "message": "Validation failed."},
            {"line": 3, "identifier": "sku-3", "status_code": 201}
        ]);

        let failed = failed_lines(&body);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0]["identifier"], "sku-2");
    }

    #[test]
    fn test_failed_lines_ignores_non_array_bodies() {
        assert!(failed_lines(&json!({})).is_empty());
    }
}
