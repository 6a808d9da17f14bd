//! Configuration types for the Akeneo API client.
//!
//! This module provides the core configuration types used to authenticate
//! against a PIM instance and tune the HTTP layer.
//!
//! # Overview
//!
//! - [`AkeneoConfig`]: The configuration struct holding credentials and settings
//! - [`AkeneoConfigBuilder`]: A builder for constructing [`AkeneoConfig`] instances
//! - [`HostUrl`]: The validated base URL of the PIM
//! - [`ClientId`], [`ClientSecret`]: The API connection credentials
//! - [`Username`], [`Password`]: The API user credentials
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::{AkeneoConfig, ClientId, ClientSecret, HostUrl, Password, Username};
//!
//! let config = AkeneoConfig::builder()
//!     .host(HostUrl::new("https://pim.example.com").unwrap())
//!     .client_id(ClientId::new("client-id").unwrap())
//!     .client_secret(ClientSecret::new("client-secret").unwrap())
//!     .username(Username::new("api-user").unwrap())
//!     .password(Password::new("api-password").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_limit(), 100);
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, HostUrl, Password, Username};

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default page size for list endpoints (the API maximum).
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Default cap on the number of pages followed by one list call.
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Default margin before token expiry at which a refresh is due.
pub const DEFAULT_TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Largest page size the PIM accepts.
pub(crate) const MAX_PAGE_LIMIT: u32 = 100;

/// Configuration for the Akeneo API client.
///
/// # Thread Safety
///
/// `AkeneoConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct AkeneoConfig {
    host: HostUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    username: Username,
    password: Password,
    timeout: Duration,
    page_limit: u32,
    max_pages: u32,
    token_refresh_margin: Duration,
    user_agent_prefix: Option<String>,
}

impl AkeneoConfig {
    /// Creates a new builder for constructing an `AkeneoConfig`.
    #[must_use]
    pub fn builder() -> AkeneoConfigBuilder {
        AkeneoConfigBuilder::new()
    }

    /// Returns the base URL of the PIM.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API connection client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the API connection secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the API user name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the API user password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the timeout applied to every HTTP call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the default page size for list endpoints.
    #[must_use]
    pub const fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Returns the maximum number of pages one list call follows.
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns how long before expiry a token is considered due for refresh.
    #[must_use]
    pub const fn token_refresh_margin(&self) -> Duration {
        self.token_refresh_margin
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AkeneoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AkeneoConfig>();
};

/// Builder for constructing [`AkeneoConfig`] instances.
///
/// Required fields are `host`, `client_id`, `client_secret`, `username`
/// and `password`.
///
/// # Defaults
///
/// - `timeout`: 30 seconds
/// - `page_limit`: 100
/// - `max_pages`: 10 000
/// - `token_refresh_margin`: 60 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AkeneoConfigBuilder {
    host: Option<HostUrl>,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    username: Option<Username>,
    password: Option<Password>,
    timeout: Option<Duration>,
    page_limit: Option<u32>,
    max_pages: Option<u32>,
    token_refresh_margin: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl AkeneoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the PIM (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API connection client ID (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the API connection secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the API user name (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the API user password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the timeout applied to every HTTP call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default page size for list endpoints (1..=100).
    #[must_use]
    pub const fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Sets the maximum number of pages one list call follows.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Sets how long before expiry a token is considered due for refresh.
    #[must_use]
    pub const fn token_refresh_margin(mut self, margin: Duration) -> Self {
        self.token_refresh_margin = Some(margin);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AkeneoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a credential or the
    /// host is not set, [`ConfigError::InvalidPageLimit`] if the page size is
    /// outside 1..=100 and [`ConfigError::InvalidMaxPages`] if the page cap is 0.
    pub fn build(self) -> Result<AkeneoConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        let page_limit = self.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if page_limit == 0 || page_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::InvalidPageLimit { limit: page_limit });
        }

        let max_pages = self.max_pages.unwrap_or(DEFAULT_MAX_PAGES);
        if max_pages == 0 {
            return Err(ConfigError::InvalidMaxPages { max_pages });
        }

        Ok(AkeneoConfig {
            host,
            client_id,
            client_secret,
            username,
            password,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            page_limit,
            max_pages,
            token_refresh_margin: self
                .token_refresh_margin
                .unwrap_or(DEFAULT_TOKEN_REFRESH_MARGIN),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
