//! REST-specific error types for the Akeneo API client.
//!
//! - [`RestError::Unauthenticated`]: No usable bearer token is available
//! - [`RestError::InvalidPath`]: When a REST API path fails validation
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//! - [`RestError::Pagination`]: A list fetch stopped early; carries the partial result
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::clients::rest::{PaginationFailure, RestError};
//!
//! match client.get_products(&ListQuery::default()).await {
//!     Ok(products) => println!("{} products", products.len()),
//!     Err(RestError::Pagination { items, reason, .. }) => {
//!         println!("Got {} products before failing: {}", items.len(), reason);
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Why a pagination loop stopped before reaching the last page.
#[derive(Debug, Error)]
pub enum PaginationFailure {
    /// A page request failed.
    #[error(transparent)]
    Request(#[from] HttpError),

    /// A page response had no `_embedded.items` array.
    #[error("Page {url} has no _embedded.items array")]
    MissingItems {
        /// URL of the malformed page.
        url: String,
    },

    /// The server sent a `next` link that was already visited.
    #[error("Pagination cycle detected: {url} was already fetched")]
    Cycle {
        /// The repeated URL.
        url: String,
    },

    /// The configured page cap was reached while more pages remained.
    #[error("Stopped after {max_pages} pages with more pages remaining")]
    MaxPagesExceeded {
        /// The configured cap.
        max_pages: u32,
    },
}

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use akeneo_api::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// No bearer token is available, so no request is sent.
    #[error("No access token available. Authenticate before calling the REST API.")]
    Unauthenticated,

    /// The REST API path is invalid.
    ///
    /// This error is returned when a path is empty after normalization.
    #[error("Invalid REST API path: '{path}'")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A list fetch stopped before its last page.
    ///
    /// `items` holds everything collected before the failure, in page order.
    #[error(
        "Pagination stopped after {pages_fetched} page(s) with {} item(s) collected: {reason}",
        .items.len()
    )]
    Pagination {
        /// Items collected before the failure.
        items: Vec<serde_json::Value>,
        /// Number of pages successfully fetched.
        pages_fetched: u32,
        /// Why the loop stopped.
        reason: PaginationFailure,
    },
}

impl RestError {
    /// Returns the HTTP status code of the failed response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e)
            | Self::Pagination {
                reason: PaginationFailure::Request(e),
                ..
            } => e.status(),
            _ => None,
        }
    }

    /// Returns the items collected before a pagination failure.
    #[must_use]
    pub fn partial_items(&self) -> Option<&[serde_json::Value]> {
        match self {
            Self::Pagination { items, .. } => Some(items),
            _ => None,
        }
    }
}

// Verify RestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    #[test]
    fn test_invalid_path_error_formats_message() {
        let error = RestError::InvalidPath {
            path: "/".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid REST API path: '/'");
    }

    #[test]
    fn test_http_error_wraps_and_reports_status() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 404,
            message: "Not Found".to_string(),
            body: json!({}),
        });
        let rest_error: RestError = http_error.into();

        assert!(matches!(rest_error, RestError::Http(_)));
        assert_eq!(rest_error.status(), Some(404));
        assert!(rest_error.to_string().contains("404"));
    }

    #[test]
    fn test_pagination_error_carries_partial_items() {
        let error = RestError::Pagination {
            items: vec![json!({"code": "a"}), json!({"code": "b"})],
            pages_fetched: 1,
            reason: PaginationFailure::Cycle {
                url: "http://pim/api/rest/v1/families?page=2".to_string(),
            },
        };

        assert_eq!(error.partial_items().map(<[_]>::len), Some(2));
        assert_eq!(error.status(), None);
        let message = error.to_string();
        assert!(message.contains("1 page(s)"));
        assert!(message.contains("2 item(s)"));
        assert!(message.contains("cycle"));
    }

    #[test]
    fn test_pagination_request_failure_reports_status() {
        let error = RestError::Pagination {
            items: vec![],
            pages_fetched: 0,
            reason: PaginationFailure::Request(HttpError::Response(HttpResponseError {
                code: 500,
                message: "Internal Server Error".to_string(),
                body: json!({}),
            })),
        };
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_max_pages_message() {
        let failure = PaginationFailure::MaxPagesExceeded { max_pages: 3 };
        assert_eq!(
            failure.to_string(),
            "Stopped after 3 pages with more pages remaining"
        );
    }

    #[test]
    fn test_unauthenticated_has_no_partial_items() {
        assert!(RestError::Unauthenticated.partial_items().is_none());
    }
}
