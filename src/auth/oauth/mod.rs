//! OAuth 2.0 token grants for the Akeneo API.
//!
//! - [`fetch_token`]: password grant, used when a client is created
//! - [`refresh_access_token`]: refresh-token grant, used to rotate a session
//! - [`OAuthError`]: failures of either grant
//!
//! Both grants POST to [`TOKEN_PATH`] with the API connection credentials in
//! an HTTP Basic `Authorization` header.

mod error;
mod password_grant;
mod token_refresh;

pub use error::OAuthError;
pub use password_grant::{fetch_token, TOKEN_PATH};
pub use token_refresh::refresh_access_token;
