use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::Config,
    management::{AnalysisCache, TokenStore},
};

/// Shared state handed to every request handler.
///
/// Everything inside is cheap to clone: the config is behind an `Arc`, the
/// reqwest client is internally reference-counted, and the store and cache
/// are handles to their shared slots.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
    pub tokens: TokenStore,
    pub analysis_cache: AnalysisCache,
}

impl AppState {
    /// Builds the runtime state: a shared HTTP client with the configured
    /// request timeout, the token store (seeded when a refresh token is
    /// provisioned through the environment), and an empty analysis cache.
    pub fn new(config: Config) -> Res<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let tokens = match &config.refresh_token {
            Some(refresh_token) => TokenStore::with_refresh_token(refresh_token.clone()),
            None => TokenStore::new(),
        };

        Ok(AppState {
            config: Arc::new(config),
            client,
            tokens,
            analysis_cache: AnalysisCache::new(),
        })
    }
}

/// Builds the bridge router with all endpoints and a permissive CORS layer,
/// so browser-based consumer apps can call it directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .route("/now-playing", get(api::now_playing))
        .route("/audio-analysis", get(api::audio_analysis))
        .route("/health", get(api::health))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: AppState) {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
