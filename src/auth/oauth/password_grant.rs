//! OAuth 2.0 Resource Owner Password Credentials Grant.
//!
//! The PIM issues API tokens through the password grant: the API connection
//! (client ID and secret) authenticates with HTTP Basic credentials while the
//! API user's name and password travel in the form body.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::fetch_token;
//!
//! let session = fetch_token(&config).await?;
//! println!("Token expires at {:?}", session.expires);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::auth::oauth::OAuthError;
use crate::auth::session::AccessTokenResponse;
use crate::auth::Session;
use crate::config::AkeneoConfig;

/// Path of the token endpoint, relative to the PIM host.
pub const TOKEN_PATH: &str = "/api/oauth/v1/token";

/// Grant type for password credentials.
const PASSWORD_GRANT_TYPE: &str = "password";

/// Obtains a bearer token with the password grant.
///
/// # Errors
///
/// - [`OAuthError::TokenRequestFailed`] if the credentials are rejected
///   (with the HTTP status) or the endpoint is unreachable (status 0)
/// - [`OAuthError::InvalidTokenResponse`] if the success body cannot be parsed
pub async fn fetch_token(config: &AkeneoConfig) -> Result<Session, OAuthError> {
    let form = [
        ("grant_type", PASSWORD_GRANT_TYPE),
        ("username", config.username().as_ref()),
        ("password", config.password().as_ref()),
    ];

    let session = request_token(config, &form).await?;
    tracing::info!(
        "Obtained access token for user {} from {}",
        config.username().as_ref(),
        config.host()
    );
    Ok(session)
}

/// Sends a form-encoded grant request to the token endpoint.
pub(crate) async fn request_token(
    config: &AkeneoConfig,
    form: &[(&str, &str)],
) -> Result<Session, OAuthError> {
    let token_url = config.host().join(TOKEN_PATH);

    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(config.timeout())
        .build()
        .map_err(|e| OAuthError::TokenRequestFailed {
            status: 0,
            message: format!("Failed to create HTTP client: {e}"),
        })?;

    let response = client
        .post(&token_url)
        .header(
            "Authorization",
            basic_credentials(config.client_id().as_ref(), config.client_secret().as_ref()),
        )
        .form(form)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Token endpoint {} unreachable: {}", token_url, e);
            OAuthError::TokenRequestFailed {
                status: 0,
                message: format!("Network error: {e}"),
            }
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!("Token request rejected with status {}: {}", status, error_body);
        return Err(OAuthError::TokenRequestFailed {
            status,
            message: error_body,
        });
    }

    let token_response: AccessTokenResponse =
        response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidTokenResponse {
                message: format!("Failed to parse token response: {e}"),
            })?;

    if token_response.access_token.is_empty() {
        return Err(OAuthError::InvalidTokenResponse {
            message: "Token response contains an empty access token".to_string(),
        });
    }

    Ok(Session::from_access_token_response(&token_response))
}

/// Builds the `Authorization` header value for the API connection.
fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}
