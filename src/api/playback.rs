use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{server::AppState, spotify::player, types::ApiError, warning};

/// Passes the upstream currently-playing document through unchanged.
///
/// The bearer token is read from the store at call time. `204` mirrors the
/// upstream's "nothing playing" answer; upstream failures are logged and
/// collapsed to a fixed `500` message.
pub async fn now_playing(Extension(state): Extension<AppState>) -> Response {
    let token = state.tokens.get().await;
    if token.is_empty() {
        return unauthenticated();
    }

    match player::currently_playing(&state.client, &state.config.api_url, &token.access_token).await
    {
        Ok(Some(playing)) => Json(playing).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warning!("failed to fetch now playing: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch now playing." })),
            )
                .into_response()
        }
    }
}

/// Serves the audio analysis for the currently playing track.
///
/// Looks up the current track first, then delegates to the analysis cache so
/// repeated calls for the same track within the TTL cost no upstream
/// request. `404` when nothing is playing, `500` on any upstream failure.
pub async fn audio_analysis(Extension(state): Extension<AppState>) -> Response {
    let token = state.tokens.get().await;
    if token.is_empty() {
        return unauthenticated();
    }

    let playing =
        match player::currently_playing(&state.client, &state.config.api_url, &token.access_token)
            .await
        {
            Ok(playing) => playing,
            Err(e) => {
                warning!("failed to fetch playback state: {}", e);
                return analysis_failure();
            }
        };

    let track_id = playing.as_ref().and_then(player::current_track_id);

    let cache = state.analysis_cache.clone();
    let fetch_id = track_id.clone().unwrap_or_default();
    let result = cache
        .get_or_fetch(track_id.as_deref(), || async move {
            player::audio_analysis(
                &state.client,
                &state.config.api_url,
                &token.access_token,
                &fetch_id,
            )
            .await
        })
        .await;

    match result {
        Ok(analysis) => Json(analysis).into_response(),
        Err(ApiError::NoActiveTrack) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No track currently playing" })),
        )
            .into_response(),
        Err(e) => {
            warning!("failed to fetch audio analysis: {}", e);
            analysis_failure()
        }
    }
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Not authenticated with Spotify." })),
    )
        .into_response()
}

fn analysis_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to fetch audio analysis" })),
    )
        .into_response()
}
