//! REST client implementation for the Akeneo REST API.
//!
//! This module provides the [`RestClient`] type for making single-resource
//! requests with path normalization and body encoding.

use crate::auth::Session;
use crate::clients::http_client::is_absolute_url;
use crate::clients::rest::body::failed_lines;
use crate::clients::rest::{PatchBody, RestError};
use crate::clients::{
    DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartField, RequestBody,
};
use crate::config::AkeneoConfig;

/// REST API client for the PIM.
///
/// Provides `get`, `patch`, `delete` and `post_multipart` on top of
/// [`HttpClient`]. Every request carries the session's bearer token; a
/// client cannot be built without one.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use akeneo_api::clients::rest::RestClient;
/// use serde_json::json;
///
/// let client = RestClient::new(&config, &session)?;
///
/// let response = client.get("families/shoes", &[]).await?;
/// let response = client.patch("families/shoes", json!({"labels": {"en_US": "Shoes"}}).into()).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the given session.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Unauthenticated`] if the session has no access
    /// token, or [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &AkeneoConfig, session: &Session) -> Result<Self, RestError> {
        if session.access_token.is_empty() {
            tracing::warn!("Refusing to create a REST client without an access token");
            return Err(RestError::Unauthenticated);
        }

        let http_client = HttpClient::new(config, session)?;
        Ok(Self { http_client })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The REST API path (e.g., "products/sku-1") or an absolute URL
    /// * `query` - Query parameters, in order
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a PATCH request to the specified path.
    ///
    /// JSON bodies are serialized; collection bodies are sent verbatim. Bulk
    /// endpoints answer with one status per item; every failed item is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(&self, path: &str, body: PatchBody) -> Result<HttpResponse, RestError> {
        let body = match body {
            PatchBody::Json(value) => (RequestBody::Json(value), DataType::Json),
            PatchBody::Collection(collection) => {
                (RequestBody::Raw(collection.into_string()), DataType::Collection)
            }
        };

        let response = self
            .make_request(HttpMethod::Patch, path, Some(body), &[])
            .await?;

        for item in failed_lines(&response.body) {
            tracing::warn!("PATCH {} item failed: {}", path, item);
        }

        Ok(response)
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, &[]).await
    }

    /// Sends a `multipart/form-data` POST request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<MultipartField>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(
            HttpMethod::Post,
            path,
            Some((RequestBody::Multipart(fields), DataType::FormData)),
            &[],
        )
        .await
    }

    /// Internal helper to build and send requests.
    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<(RequestBody, DataType)>,
        query: &[(String, String)],
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        // Every REST call declares JSON unless it carries another body type
        let mut builder = HttpRequest::builder(method, normalized_path).query(query.to_vec());
        builder = match body {
            Some((body, body_type)) => builder.body(body).body_type(body_type),
            None => builder.body_type(DataType::Json),
        };

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a REST API path.
///
/// Absolute URLs are returned unchanged. Relative paths lose their leading
/// and trailing `/`; an empty result is rejected.
fn normalize_path(path: &str) -> Result<String, RestError> {
    if is_absolute_url(path) {
        return Ok(path.to_string());
    }

    let normalized = path.trim().trim_matches('/');
    if normalized.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(normalized.to_string())
}
