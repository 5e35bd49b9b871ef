//! Configuration management for the now-playing bridge.
//!
//! This module loads configuration from environment variables and an optional
//! `.env` file in the working directory. All values are collected once at
//! startup into an immutable [`Config`] that is shared with the handlers and
//! the background refresher for the lifetime of the process.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use std::env;

/// Scopes requested during authorization when `SCOPE` is not set.
///
/// This is the set agreed with the consumer application; it can be narrowed or
/// widened per deployment through the `SCOPE` environment variable.
pub const DEFAULT_SCOPE: &str =
    "user-read-playback-state user-read-currently-playing streaming user-modify-playback-state";

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Immutable process-lifetime configuration.
///
/// The accounts and API base URLs default to the real Spotify endpoints and
/// are only overridden in tests, where they point at a mock upstream.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spotify application client ID.
    pub client_id: String,
    /// Spotify application client secret; used only for HTTP Basic auth
    /// against the token endpoint, never sent to API resource endpoints.
    pub client_secret: String,
    /// Redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    /// Space-joined OAuth scope set requested on `/login`.
    pub scope: String,
    /// Refresh token provisioned out-of-band, if any. When present the
    /// server is usable without ever visiting `/login`.
    pub refresh_token: Option<String>,
    /// Port the bridge server listens on.
    pub port: u16,
    /// Cadence of the scheduled token refresh, in seconds.
    pub refresh_interval_secs: u64,
    /// Bound on every outbound upstream request, in seconds.
    pub request_timeout_secs: u64,
    /// Base URL of the Spotify accounts service (authorize + token endpoints).
    pub accounts_url: String,
    /// Base URL of the Spotify Web API.
    pub api_url: String,
}

impl Config {
    /// Builds the configuration from the environment.
    ///
    /// `CLIENT_ID`, `CLIENT_SECRET` and `REDIRECT_URI` are required; all
    /// other values have defaults. Returns a message naming the missing
    /// variable on failure so startup errors are actionable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
            scope: env::var("SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),
            refresh_token: env::var("REFRESH_TOKEN").ok().filter(|t| !t.is_empty()),
            port: parsed("PORT", 3000)?,
            refresh_interval_secs: parsed("REFRESH_INTERVAL_SECS", 900)?,
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", 10)?,
            accounts_url: env::var("ACCOUNTS_URL")
                .unwrap_or_else(|_| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }
}

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing file is not an error; deployments may supply everything through
/// the process environment directly.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} must be set", name))
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
