//! Error types for the Akeneo API client.
//!
//! This module contains [`ConfigError`] for configuration and validation
//! errors, and [`AkeneoError`] for operations that span several layers, such
//! as connecting a client.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::clients::rest::RestError;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID of your Akeneo API connection.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the secret of your Akeneo API connection.")]
    EmptyClientSecret,

    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the API user name.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the API user password.")]
    EmptyPassword,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide an http(s) URL (e.g., 'https://pim.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Page size is out of the range accepted by the API.
    #[error("Invalid page limit {limit}. The API accepts values between 1 and 100.")]
    InvalidPageLimit {
        /// The rejected page size.
        limit: u32,
    },

    /// Page cap must allow at least one page.
    #[error("Invalid max pages {max_pages}. At least one page must be allowed.")]
    InvalidMaxPages {
        /// The rejected page cap.
        max_pages: u32,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Errors of operations that both authenticate and talk to the REST API.
///
/// Endpoint methods return [`RestError`] directly; this type is used where a
/// token grant is involved, such as [`AkeneoClient::connect`](crate::AkeneoClient::connect)
/// and [`AkeneoClient::refresh_token`](crate::AkeneoClient::refresh_token).
#[derive(Debug, Error)]
pub enum AkeneoError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Obtaining or refreshing the token failed.
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// The REST client could not be created or a request failed.
    #[error(transparent)]
    Rest(#[from] RestError),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
    assert_send_sync::<AkeneoError>();
};
