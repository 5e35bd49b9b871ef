use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::types::ApiError;

/// Fetches the current playback state for the authenticated user.
///
/// Returns `Ok(None)` when Spotify reports that nothing is playing (a `204 No
/// Content` answer), and the raw playback document otherwise. The payload is
/// passed through opaquely; only the track id is ever inspected by this
/// server (see [`current_track_id`]).
pub async fn currently_playing(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Option<Value>, ApiError> {
    let res = client
        .get(format!("{}/me/player/currently-playing", api_url))
        .bearer_auth(token)
        .send()
        .await
        .map_err(ApiError::from_transport)?;

    match res.status() {
        StatusCode::NO_CONTENT => Ok(None),
        status if status.is_success() => {
            let body: Value = res.json().await.map_err(ApiError::from_transport)?;
            Ok(Some(body))
        }
        status => Err(ApiError::UpstreamStatus(status)),
    }
}

/// Fetches the audio-analysis document for a track.
///
/// The document is immutable per track, which is what makes it worth caching
/// on our side (see `management::AnalysisCache`).
pub async fn audio_analysis(
    client: &Client,
    api_url: &str,
    token: &str,
    track_id: &str,
) -> Result<Value, ApiError> {
    let res = client
        .get(format!("{}/audio-analysis/{}", api_url, track_id))
        .bearer_auth(token)
        .send()
        .await
        .map_err(ApiError::from_transport)?;

    let status = res.status();
    if !status.is_success() {
        return Err(ApiError::UpstreamStatus(status));
    }

    res.json().await.map_err(ApiError::from_transport)
}

/// Extracts the playing track's id from a playback document.
///
/// Returns `None` when the item is absent or null (for example when the user
/// is playing a podcast episode without a track id, or playback just ended).
pub fn current_track_id(playing: &Value) -> Option<String> {
    playing
        .get("item")?
        .get("id")?
        .as_str()
        .map(|id| id.to_string())
}
