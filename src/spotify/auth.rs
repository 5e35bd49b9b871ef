use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config::Config,
    types::{ApiError, Token, TokenResponse},
};

/// Builds the Spotify authorization redirect URL for the configured app.
///
/// Pure and deterministic: the same configuration always yields the same URL.
/// The scope set is sent space-joined as Spotify expects; every query value
/// is percent-encoded.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config) -> String {
    format!(
        "{accounts}/authorize?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        accounts = config.accounts_url,
        client_id = urlencoding::encode(&config.client_id),
        redirect_uri = urlencoding::encode(&config.redirect_uri),
        scope = urlencoding::encode(&config.scope),
    )
}

/// Exchanges an authorization code for a token pair.
///
/// Performs the single POST of the authorization-code grant against the token
/// endpoint, authenticated with HTTP Basic client credentials. The exchange
/// is one-shot and user-driven, so there is no retry policy; a failed
/// exchange means the user restarts the browser flow.
///
/// # Arguments
///
/// * `config` - Application configuration (client credentials, redirect URI)
/// * `client` - Shared HTTP client with the request timeout applied
/// * `code` - Authorization code received on the callback endpoint
///
/// # Errors
///
/// Returns [`ApiError::UpstreamAuth`] when the endpoint answers non-2xx or
/// with a body that does not parse as a token response,
/// [`ApiError::UpstreamTimeout`] when the request times out, and
/// [`ApiError::UpstreamRequest`] for other transport failures.
pub async fn exchange_code(config: &Config, client: &Client, code: &str) -> Result<Token, ApiError> {
    request_token(
        config,
        client,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ],
    )
    .await
}

/// Obtains a fresh access token from a refresh token.
///
/// Uses the `refresh_token` grant against the same token endpoint. The
/// response usually omits the refresh token; when Spotify rotates it, the
/// returned [`Token`] carries the new one and the caller is expected to keep
/// it (see `TokenStore::apply_refresh`).
pub async fn refresh_access_token(
    config: &Config,
    client: &Client,
    refresh_token: &str,
) -> Result<Token, ApiError> {
    request_token(
        config,
        client,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

/// One form-encoded POST to the token endpoint with Basic client credentials.
async fn request_token(
    config: &Config,
    client: &Client,
    form: &[(&str, &str)],
) -> Result<Token, ApiError> {
    let res = client
        .post(format!("{}/api/token", config.accounts_url))
        .header("Authorization", basic_auth(config))
        .form(form)
        .send()
        .await
        .map_err(ApiError::from_transport)?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::UpstreamAuth(format!("{}: {}", status, body)));
    }

    let token: TokenResponse = res
        .json()
        .await
        .map_err(|e| ApiError::UpstreamAuth(format!("malformed token response: {}", e)))?;

    Ok(token.into())
}

/// `Basic` authorization header value from `client_id:client_secret`.
fn basic_auth(config: &Config) -> String {
    let credentials = format!("{}:{}", config.client_id, config.client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}
