//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Akeneo API connection client ID.
///
/// # Example
///
/// ```rust
/// use akeneo_api::ClientId;
///
/// let id = ClientId::new("1_abc").unwrap();
/// assert_eq!(id.as_ref(), "1_abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Akeneo API connection secret.
///
/// The `Debug` implementation masks the value, displaying only
/// `ClientSecret(*****)`.
///
/// ```rust
/// use akeneo_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated API user name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated API user password, masked in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated base URL of the PIM instance.
///
/// Only `http` and `https` schemes are accepted. Trailing slashes are
/// removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use akeneo_api::HostUrl;
///
/// let url = HostUrl::new("https://pim.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://pim.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("pim.example.com"));
/// assert_eq!(url.join("/api/rest/v1/products"), "https://pim.example.com/api/rest/v1/products");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.contains(['?', '#']) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Scheme and host are case-insensitive; the path is not
        let url = format!("{}{}", url[..host_end].to_ascii_lowercase(), &url[host_end..]);

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Appends an absolute path to the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty_string() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_client_secret_masks_value_in_debug() {
        let secret = ClientSecret::new("super-secret").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "ClientSecret(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{:?}", password), "Password(*****)");
        assert_eq!(password.as_ref(), "hunter2");
    }

    #[test]
    fn test_username_is_trimmed_and_rejects_blank() {
        assert_eq!(Username::new("  admin ").unwrap().as_ref(), "admin");
        assert!(matches!(Username::new("   "), Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn test_host_url_validates_format() {
        let url = HostUrl::new("https://pim.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("pim.example.com"));

        let url = HostUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("localhost"));

        // Installations served under a sub path keep it
        let url = HostUrl::new("https://example.com/pim/").unwrap();
        assert_eq!(url.as_ref(), "https://example.com/pim");
        assert_eq!(url.host_name(), Some("example.com"));
    }

    #[test]
    fn test_host_url_lowercases_scheme_and_host() {
        let url = HostUrl::new("HTTPS://PIM.Example.com:8443/Pim").unwrap();
        assert_eq!(url.as_ref(), "https://pim.example.com:8443/Pim");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("pim.example.com"));
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("pim.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("ftp://pim.example.com").is_err());
        assert!(HostUrl::new("https://pim.example.com?x=1").is_err());
    }

    #[test]
    fn test_host_url_join_handles_slashes() {
        let url = HostUrl::new("https://pim.example.com/").unwrap();
        assert_eq!(
            url.join("api/oauth/v1/token"),
            "https://pim.example.com/api/oauth/v1/token"
        );
        assert_eq!(
            url.join("/api/oauth/v1/token"),
            "https://pim.example.com/api/oauth/v1/token"
        );
    }
}
