//! HTTP client for Akeneo API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the PIM REST API.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};

use crate::auth::Session;
use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest, MultipartField, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::config::AkeneoConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base path of the REST API.
pub const REST_BASE_PATH: &str = "/api/rest/v1";

/// HTTP client for making requests to the PIM.
///
/// The client handles:
/// - URL construction from the configured host and the REST base path
/// - Default headers including User-Agent and the bearer token
/// - Body encoding (JSON, collection, multipart)
/// - Response parsing and error mapping
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use akeneo_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config, &session)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "channels")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://pim.example.com`).
    base_uri: String,
    /// Base path (e.g., "/api/rest/v1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given session.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &AkeneoConfig, session: &Session) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Akeneo API Rust v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if !session.access_token.is_empty() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", session.access_token),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_uri: config.host().as_ref().to_string(),
            base_path: REST_BASE_PATH.to_string(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a path and its query parameters.
    ///
    /// Relative paths are resolved against the REST base path. Absolute
    /// `http(s)://` URLs, such as pagination links, are used as-is. Query
    /// parameters are percent-encoded and appended in order.
    #[must_use]
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = if is_absolute_url(path) {
            path.to_string()
        } else {
            format!(
                "{}{}/{}",
                self.base_uri,
                self.base_path,
                path.trim_start_matches('/')
            )
        };

        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }

        url
    }

    /// Sends an HTTP request to the PIM.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails, or an absolute URL leaves the configured
    ///   host (`InvalidRequest`)
    /// - Network error or timeout occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let requested = self.build_url(&request.path, &request.query);
        let Some(url) = self.own_url(&requested) else {
            tracing::warn!("Refusing request to foreign URL {}", requested);
            return Err(InvalidHttpRequestError::ForeignUrl { url: requested }.into());
        };

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = request.body_type {
            // reqwest sets the multipart header itself, boundary included
            if body_type != DataType::FormData {
                headers.insert(
                    "Content-Type".to_string(),
                    body_type.as_content_type().to_string(),
                );
            }
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let method = request.http_method;
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = match body {
                RequestBody::Json(value) => req_builder.body(value.to_string()),
                RequestBody::Raw(text) => req_builder.body(text),
                RequestBody::Multipart(fields) => req_builder.multipart(build_form(fields)?),
            };
        }

        tracing::debug!("{} {}", method, url);

        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            HttpError::Network(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(|e| {
            tracing::warn!("{} {} body could not be read: {}", method, url, e);
            HttpError::Network(e)
        })?;

        let response = HttpResponse::new(code, res_headers, HttpResponse::parse_body(&body_text));

        if response.is_ok() {
            return Ok(response);
        }

        let message = Self::error_message(&response.body, code);
        tracing::warn!("{} {} returned status {}: {}", method, url, code, message);

        Err(HttpError::Response(HttpResponseError {
            code,
            message,
            body: response.body,
        }))
    }

    /// Returns the URL to request if `url` points at the configured origin.
    ///
    /// Scheme, host and effective port must match. A plain `http` link on
    /// port 80 to an `https` host, as sent by a PIM behind a TLS-terminating
    /// proxy, is rewritten to the configured origin. Anything else is `None`.
    fn own_url(&self, url: &str) -> Option<String> {
        let base = reqwest::Url::parse(&self.base_uri).ok()?;
        let mut target = reqwest::Url::parse(url).ok()?;

        if target.host_str() != base.host_str() {
            return None;
        }

        if target.scheme() == base.scheme()
            && target.port_or_known_default() == base.port_or_known_default()
        {
            return Some(url.to_string());
        }

        if base.scheme() == "https"
            && target.scheme() == "http"
            && target.port_or_known_default() == Some(80)
        {
            target.set_scheme("https").ok()?;
            target.set_port(base.port()).ok()?;
            tracing::debug!("Upgrading {} to the configured https origin", url);
            return Some(target.into());
        }

        None
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Extracts a readable message from an error body.
    fn error_message(body: &serde_json::Value, code: u16) -> String {
        ["message", "error_description", "error", "raw_body"]
            .iter()
            .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
            .map_or_else(
                || {
                    reqwest::StatusCode::from_u16(code)
                        .ok()
                        .and_then(|status| status.canonical_reason())
                        .unwrap_or("Unknown error")
                        .to_string()
                },
                |message| message.trim().to_string(),
            )
    }
}

/// Converts multipart fields into a reqwest form.
fn build_form(fields: Vec<MultipartField>) -> Result<Form, HttpError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File {
                name,
                file_name,
                mime,
                bytes,
            } => form.part(name, Part::bytes(bytes).file_name(file_name).mime_str(&mime)?),
        };
    }
    Ok(form)
}

/// Returns `true` for `http(s)` URLs, whatever the case of the scheme.
pub(crate) fn is_absolute_url(path: &str) -> bool {
    reqwest::Url::parse(path).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, HostUrl, Password, Username};
    use serde_json::json;

    fn create_config(prefix: Option<&str>) -> AkeneoConfig {
        let mut builder = AkeneoConfig::builder()
            .host(HostUrl::new("https://pim.example.com").unwrap())
            .client_id(ClientId::new("client-id").unwrap())
            .client_secret(ClientSecret::new("client-secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    fn create_client() -> HttpClient {
        let session = Session::new("test-access-token".to_string(), None, None);
        HttpClient::new(&create_config(None), &session).unwrap()
    }

    #[test]
    fn test_client_construction_with_session() {
        let client = create_client();

        assert_eq!(client.base_uri(), "https://pim.example.com");
        assert_eq!(client.base_path(), "/api/rest/v1");
    }

    #[test]
    fn test_bearer_header_injection() {
        let client = create_client();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-access-token".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_when_token_empty() {
        let session = Session::new(String::new(), None, None);
        let client = HttpClient::new(&create_config(None), &session).unwrap();

        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let session = Session::new("token".to_string(), None, None);
        let client = HttpClient::new(&create_config(Some("SyncJob/2.1")), &session).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("SyncJob/2.1 | "));
        assert!(user_agent.contains("Akeneo API Rust v"));
    }

    #[test]
    fn test_build_url_relative_path() {
        let client = create_client();

        assert_eq!(
            client.build_url("/products/sku-1", &[]),
            "https://pim.example.com/api/rest/v1/products/sku-1"
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let client = create_client();
        let query = vec![
            ("limit".to_string(), "100".to_string()),
            (
                "search".to_string(),
                r#"{"parent":[{"operator":"=","value":"master"}]}"#.to_string(),
            ),
        ];

        assert_eq!(
            client.build_url("categories", &query),
            "https://pim.example.com/api/rest/v1/categories?limit=100&search=%7B%22parent%22%3A%5B%7B%22operator%22%3A%22%3D%22%2C%22value%22%3A%22master%22%7D%5D%7D"
        );
    }

    #[test]
    fn test_build_url_keeps_absolute_links() {
        let client = create_client();
        let next = "https://pim.example.com/api/rest/v1/products?search_after=abc&limit=10";

        assert_eq!(client.build_url(next, &[]), next);
    }

    #[test]
    fn test_own_url_accepts_configured_origin() {
        let client = create_client();
        let link = "https://pim.example.com/api/rest/v1/products";

        assert_eq!(client.own_url(link).as_deref(), Some(link));
        assert!(client
            .own_url("https://pim.example.com:443/api/rest/v1/products")
            .is_some());
        assert!(client
            .own_url("HTTPS://PIM.example.com/api/rest/v1/products")
            .is_some());
    }

    #[test]
    fn test_own_url_rejects_other_origins() {
        let client = create_client();

        assert!(client.own_url("https://pim.example.com.evil.org/api/rest/v1").is_none());
        assert!(client.own_url("https://other.example.com/api/rest/v1").is_none());
        assert!(client.own_url("https://pim.example.com:8443/api/rest/v1").is_none());
        assert!(client.own_url("http://pim.example.com:8080/api/rest/v1").is_none());
        assert!(client.own_url("products").is_none());
    }

    #[test]
    fn test_own_url_upgrades_plain_http_link_behind_tls_proxy() {
        let client = create_client();

        assert_eq!(
            client
                .own_url("http://pim.example.com/api/rest/v1/products?search_after=abc")
                .as_deref(),
            Some("https://pim.example.com/api/rest/v1/products?search_after=abc")
        );
    }

    #[test]
    fn test_is_absolute_url_ignores_scheme_case() {
        assert!(is_absolute_url("HTTP://pim.example.com/api/rest/v1/families"));
        assert!(is_absolute_url("https://pim.example.com"));
        assert!(!is_absolute_url("families"));
        assert!(!is_absolute_url("/api/rest/v1/families"));
        assert!(!is_absolute_url("sku:1"));
    }

    #[tokio::test]
    async fn test_truncated_body_is_a_network_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = [0_u8; 4096];
            let _ = socket.read(&mut buffer).await;
            // Promise more bytes than are sent, then hang up
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"code\":",
                )
                .await;
        });

        let config = AkeneoConfig::builder()
            .host(HostUrl::new(format!("http://{address}")).unwrap())
            .client_id(ClientId::new("client-id").unwrap())
            .client_secret(ClientSecret::new("client-secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin").unwrap())
            .build()
            .unwrap();
        let session = Session::new("test-access-token".to_string(), None, None);
        let client = HttpClient::new(&config, &session).unwrap();

        let request = HttpRequest::builder(HttpMethod::Get, "channels/ecommerce")
            .body_type(DataType::Json)
            .build()
            .unwrap();
        let result = client.request(request).await;

        assert!(matches!(result, Err(HttpError::Network(_))));
    }

    #[test]
    fn test_error_message_prefers_akeneo_message() {
        let body = json!({"code": 404, "message": "Resource `x` does not exist."});
        assert_eq!(
            HttpClient::error_message(&body, 404),
            "Resource `x` does not exist."
        );
        assert_eq!(HttpClient::error_message(&json!({}), 404), "Not Found");
    }

    #[test]
    fn test_build_form_rejects_invalid_mime() {
        let fields = vec![MultipartField::File {
            name: "file".to_string(),
            file_name: "x".to_string(),
            mime: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        }];
        assert!(matches!(build_form(fields), Err(HttpError::Network(_))));
    }
}
