//! HTTP request types for the Akeneo API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the PIM.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Akeneo REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method, used for media uploads.
    Post,
    /// HTTP PATCH method for creating or updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// Newline-delimited collection of JSON objects used by bulk PATCH.
    Collection,
    /// Multipart form data. The boundary is chosen when the request is sent.
    FormData,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Collection => "application/vnd.akeneo.collection+json",
            Self::FormData => "multipart/form-data",
        }
    }
}

/// One part of a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultipartField {
    /// A plain text part.
    Text {
        /// Part name.
        name: String,
        /// Part content.
        value: String,
    },
    /// A binary file part.
    File {
        /// Part name.
        name: String,
        /// File name announced in `Content-Disposition`.
        file_name: String,
        /// MIME type of the part.
        mime: String,
        /// Raw file content.
        bytes: Vec<u8>,
    },
}

/// A request body, kept unencoded until the request is sent.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document, serialized when sent.
    Json(serde_json::Value),
    /// Text sent byte-for-byte.
    Raw(String),
    /// Multipart parts.
    Multipart(Vec<MultipartField>),
}

impl RequestBody {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Raw(_) => "raw",
            Self::Multipart(_) => "multipart",
        }
    }

    const fn accepts(&self, body_type: DataType) -> bool {
        match self {
            Self::Json(_) | Self::Raw(_) => {
                matches!(body_type, DataType::Json | DataType::Collection)
            }
            Self::Multipart(_) => matches!(body_type, DataType::FormData),
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// An HTTP request to be sent to the PIM.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use akeneo_api::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "products")
///     .query_param("limit", "100")
///     .build()
///     .unwrap();
///
/// let patch_request = HttpRequest::builder(HttpMethod::Patch, "products/sku-1")
///     .body(json!({"family": "shoes"}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the REST base path) or an absolute URL.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Query parameters appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post` or `Patch` but `body` is `None`
    /// - the body cannot be encoded as `body_type`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if let Some(body) = &self.body {
            let Some(body_type) = self.body_type else {
                return Err(InvalidHttpRequestError::MissingBodyType);
            };
            if !body.accepts(body_type) {
                return Err(InvalidHttpRequestError::BodyTypeMismatch {
                    body: body.kind(),
                    body_type: body_type.as_content_type(),
                });
            }
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Patch) && self.body.is_none()
        {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
    body_type: Option<DataType>,
    query: Vec<(String, String)>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            query: Vec::new(),
            extra_headers: None,
        }
    }

    /// Sets the request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
