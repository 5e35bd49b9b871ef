use chrono::Utc;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The bearer credential for the Spotify Web API.
///
/// Exactly one token is live at a time; it starts out empty and is overwritten
/// in place by the authorization flow and the refresher. An empty
/// `access_token` means no authorization has completed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// A token provisioned out-of-band: only the refresh token is known, the
    /// access token is obtained by the first refresh.
    pub fn from_refresh_token(refresh_token: String) -> Self {
        Token {
            refresh_token,
            ..Token::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }
}

/// Body of a successful response from the Spotify token endpoint.
///
/// `refresh_token` is only present on the initial authorization-code exchange,
/// or when Spotify decides to rotate it during a refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res.refresh_token.unwrap_or_default(),
            expires_in: res.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Errors surfaced by the upstream protocol layer and the cache.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential has been obtained yet; the upstream must not be called
    /// with an empty bearer value.
    #[error("not authenticated with Spotify yet")]
    Unauthenticated,

    /// Nothing is playing, so there is no track to look up.
    #[error("no track currently playing")]
    NoActiveTrack,

    /// The upstream call exceeded the configured request timeout.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// The token endpoint rejected an exchange or refresh, or returned a body
    /// that does not parse as a token response.
    #[error("token request rejected: {0}")]
    UpstreamAuth(String),

    /// A resource endpoint answered with a non-success status.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    /// Transport-level failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    UpstreamRequest(String),
}

impl ApiError {
    /// Maps a transport error from reqwest, keeping timeouts distinguishable.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::UpstreamTimeout
        } else {
            ApiError::UpstreamRequest(err.to_string())
        }
    }
}
