//! HTTP client types for Akeneo API communication.
//!
//! This module provides the HTTP layer used by every authenticated call.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`rest::RestClient`]: Higher-level REST API client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&config, &session)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "channels")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Failures
//!
//! No request is retried. Every non-2xx status is logged with `tracing::warn!`
//! and returned as [`HttpError::Response`] carrying the status and the body,
//! parsed once.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, REST_BASE_PATH, SDK_VERSION};
pub use http_request::{
    DataType, HttpMethod, HttpRequest, HttpRequestBuilder, MultipartField, RequestBody,
};
pub use http_response::{HttpResponse, PaginationInfo};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
