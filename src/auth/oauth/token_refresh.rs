//! Token refresh with the OAuth 2.0 refresh-token grant.
//!
//! Every token issued by the PIM comes with a refresh token. Exchanging it
//! yields a new access token without sending the user password again.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::refresh_access_token;
//!
//! if let Some(refresh_token) = &session.refresh_token {
//!     let new_session = refresh_access_token(&config, refresh_token).await?;
//! }
//! ```

use super::password_grant::request_token;
use crate::auth::oauth::OAuthError;
use crate::auth::Session;
use crate::config::AkeneoConfig;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Exchanges a refresh token for a new session.
///
/// # Errors
///
/// - [`OAuthError::MissingRefreshToken`] if `refresh_token` is empty
/// - [`OAuthError::TokenRequestFailed`] if the refresh token is rejected or
///   the endpoint is unreachable
/// - [`OAuthError::InvalidTokenResponse`] if the success body cannot be parsed
pub async fn refresh_access_token(
    config: &AkeneoConfig,
    refresh_token: &str,
) -> Result<Session, OAuthError> {
    if refresh_token.is_empty() {
        return Err(OAuthError::MissingRefreshToken);
    }

    let form = [
        ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
        ("refresh_token", refresh_token),
    ];

    let session = request_token(config, &form).await?;
    tracing::info!("Refreshed access token for {}", config.host());
    Ok(session)
}
