//! Authentication for the Akeneo API client.
//!
//! - [`Session`]: the bearer token and its lifetime
//! - [`oauth`]: the OAuth 2.0 password and refresh-token grants
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::{fetch_token, refresh_access_token};
//!
//! let session = fetch_token(&config).await?;
//!
//! if session.expired() {
//!     if let Some(refresh_token) = &session.refresh_token {
//!         let session = refresh_access_token(&config, refresh_token).await?;
//!     }
//! }
//! ```

pub mod oauth;
pub mod session;

pub use session::Session;
