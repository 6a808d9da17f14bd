//! Session management for Akeneo API authentication.
//!
//! This module provides the [`Session`] type holding the bearer token used
//! by every authenticated request.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Body of a successful response from the token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Token type, `bearer` in practice.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Refresh token usable with the `refresh_token` grant.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// An authenticated session against a PIM instance.
///
/// Sessions are immutable; refreshing a token produces a new session.
///
/// # Example
///
/// ```rust
/// use akeneo_api::Session;
///
/// let session = Session::new("access-token".to_string(), None, None);
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The bearer token for API authentication.
    pub access_token: String,

    /// The refresh token issued alongside the access token, if any.
    pub refresh_token: Option<String>,

    /// The token type reported by the server.
    pub token_type: String,

    /// When the token was obtained.
    pub issued_at: DateTime<Utc>,

    /// When the token expires, if the server reported a lifetime.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a new session issued now.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            issued_at: Utc::now(),
            expires,
        }
    }

    /// Builds a session from a token endpoint response.
    #[must_use]
    pub fn from_access_token_response(response: &AccessTokenResponse) -> Self {
        let issued_at = Utc::now();
        let expires = response
            .expires_in
            .map(|seconds| issued_at + Duration::seconds(seconds));

        Self {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
            token_type: response
                .token_type
                .clone()
                .unwrap_or_else(|| "bearer".to_string()),
            issued_at,
            expires,
        }
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if the token expires within `margin` from now.
    #[must_use]
    pub fn expires_within(&self, margin: std::time::Duration) -> bool {
        let Ok(margin) = Duration::from_std(margin) else {
            return self.expires.is_some();
        };
        self.expires
            .is_some_and(|expires| match Utc::now().checked_add_signed(margin) {
                Some(deadline) => deadline >= expires,
                None => true,
            })
    }

    /// Returns `true` if this session has a token and has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
