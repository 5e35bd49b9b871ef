use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    config::Config,
    info,
    server::AppState,
    spotify,
    types::{ApiError, Token},
    warning,
};

/// In-memory store for the single live Spotify credential.
///
/// The store starts empty (or seeded with a provisioned refresh token) and is
/// overwritten in place by the authorization callback and the refresher.
/// Reads and writes go through an async `RwLock` so request handlers can read
/// concurrently while a refresh commits. Concurrent refreshes are not
/// serialized: both compute a fresh valid token, last write wins.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Token>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore::default()
    }

    /// A store seeded with an out-of-band refresh token; the first refresh
    /// (scheduled immediately at startup) fills in the access token.
    pub fn with_refresh_token(refresh_token: String) -> Self {
        TokenStore {
            inner: Arc::new(RwLock::new(Token::from_refresh_token(refresh_token))),
        }
    }

    /// Returns the current credential. Before the first successful
    /// authorization this is the empty sentinel; callers must check
    /// [`Token::is_empty`] instead of sending an empty bearer value upstream.
    pub async fn get(&self) -> Token {
        self.inner.read().await.clone()
    }

    /// Replaces the credential wholesale. Used by the authorization callback,
    /// where the token endpoint supplies the full pair.
    pub async fn set(&self, token: Token) {
        *self.inner.write().await = token;
    }

    /// Commits a refreshed token, preserving the stored refresh token unless
    /// the upstream rotated it. Returns the token as committed.
    pub async fn apply_refresh(&self, refreshed: Token) -> Token {
        let mut current = self.inner.write().await;
        current.access_token = refreshed.access_token;
        current.expires_in = refreshed.expires_in;
        current.obtained_at = refreshed.obtained_at;
        if !refreshed.refresh_token.is_empty() {
            current.refresh_token = refreshed.refresh_token;
        }
        current.clone()
    }
}

/// Refreshes the access token once, on demand.
///
/// Uses the refresh token currently in the store; on success the new access
/// token is committed through [`TokenStore::apply_refresh`], on failure the
/// stored credential is left exactly as it was and the error is returned to
/// the caller. A stale-but-previously-valid token is strictly better than
/// none.
pub async fn refresh_now(
    config: &Config,
    client: &Client,
    tokens: &TokenStore,
) -> Result<Token, ApiError> {
    let current = tokens.get().await;
    if current.refresh_token.is_empty() {
        return Err(ApiError::Unauthenticated);
    }

    let refreshed = spotify::auth::refresh_access_token(config, client, &current.refresh_token).await?;
    Ok(tokens.apply_refresh(refreshed).await)
}

/// Spawns the scheduled refresh task.
///
/// Runs a refresh immediately, then on the configured fixed interval, chosen
/// well below the upstream token lifetime so the access token never expires
/// in normal operation. A failing tick is logged and the loop continues on
/// its next tick; before any authorization has happened the tick is a silent
/// no-op. The task is independent of request lifetimes: an in-flight refresh
/// always commits.
pub fn spawn_scheduled_refresh(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(state.config.refresh_interval_secs));
        loop {
            ticker.tick().await;
            match refresh_now(&state.config, &state.client, &state.tokens).await {
                Ok(token) => {
                    info!(
                        "refreshed Spotify access token, expires in {}s",
                        token.expires_in
                    );
                }
                // Nothing to refresh until /callback or provisioning seeds
                // the store.
                Err(ApiError::Unauthenticated) => {}
                Err(e) => warning!("scheduled token refresh failed: {}", e),
            }
        }
    })
}
