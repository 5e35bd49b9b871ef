use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};

use crate::{management, server::AppState, spotify, success, warning};

/// Redirects the browser to the Spotify authorization page.
pub async fn login(Extension(state): Extension<AppState>) -> Redirect {
    Redirect::temporary(&spotify::auth::authorize_url(&state.config))
}

/// Completes the authorization-code exchange.
///
/// On success the token pair is committed to the store and the user gets a
/// plain-text confirmation to close the tab with. A rejected exchange leaves
/// the store at its prior state and answers `502`; a callback without a
/// `code` parameter answers `400`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Response {
    let Some(code) = params.get("code") else {
        return (StatusCode::BAD_REQUEST, "Missing authorization code.").into_response();
    };

    match spotify::auth::exchange_code(&state.config, &state.client, code).await {
        Ok(token) => {
            state.tokens.set(token).await;
            success!("Spotify authorization completed");
            "Spotify authorization successful. You can close this tab.".into_response()
        }
        Err(e) => {
            warning!("authorization code exchange failed: {}", e);
            (StatusCode::BAD_GATEWAY, "Error during Spotify authorization.").into_response()
        }
    }
}

/// Forces a token refresh, synchronously.
///
/// The manual counterpart of the scheduled refresher; both commit through the
/// same store and may race harmlessly (last write wins).
pub async fn refresh(Extension(state): Extension<AppState>) -> (StatusCode, Json<Value>) {
    match management::refresh_now(&state.config, &state.client, &state.tokens).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => {
            warning!("manual token refresh failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false })),
            )
        }
    }
}
