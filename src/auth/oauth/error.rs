//! OAuth-specific error types for the Akeneo API client.
//!
//! # Error Types
//!
//! - [`OAuthError::TokenRequestFailed`]: The token endpoint rejected the request or was unreachable
//! - [`OAuthError::InvalidTokenResponse`]: The token endpoint answered with an unusable body
//! - [`OAuthError::MissingRefreshToken`]: A refresh was requested for a session without refresh token
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenRequestFailed {
//!     status: 422,
//!     message: "This grant type is not supported".to_string(),
//! };
//! assert!(error.to_string().contains("422"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining or refreshing a token.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token request failed.
    ///
    /// `status` is the HTTP status returned by the token endpoint, or `0`
    /// when the endpoint could not be reached at all.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned, 0 for network failures.
        status: u16,
        /// The error message from the response or the transport.
        message: String,
    },

    /// The token endpoint returned a success status with an unusable body.
    #[error("Invalid token response: {message}")]
    InvalidTokenResponse {
        /// Why the body could not be used.
        message: String,
    },

    /// The session has no refresh token to exchange.
    #[error("The session has no refresh token")]
    MissingRefreshToken,
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
