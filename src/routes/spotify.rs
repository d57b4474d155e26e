// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify widget routes.

use crate::error::{AppError, Result};
use crate::middleware::no_store;
use crate::models::NowPlayingView;
use crate::AppState;
use axum::{
    extract::{Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Characters of the authorization code echoed back by the callback.
const CODE_PREVIEW_LEN: usize = 10;

pub fn routes() -> Router<Arc<AppState>> {
    let now_playing = Router::new()
        .route("/api/spotify", get(get_now_playing))
        .route_layer(middleware::from_fn(no_store));

    Router::new()
        .merge(now_playing)
        .route("/api/callback", get(oauth_callback))
        .route("/api/spotify/callback", get(oauth_callback))
}

// ─── Now Playing ─────────────────────────────────────────────

/// Current track and top tracks for the widget.
///
/// Only a failed token exchange turns into an error response; missing
/// playback or ranking data shows up as `null` / `[]`.
async fn get_now_playing(State(state): State<Arc<AppState>>) -> Response {
    match state.now_playing.fetch_now_playing().await {
        Ok(view) => {
            tracing::debug!(
                has_current = view.current_track.is_some(),
                recent = view.recent_tracks.len(),
                "Now playing view built"
            );
            Json::<NowPlayingView>(view).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch Spotify data");
            e.into_response_with(state.config.environment.is_development())
        }
    }
}

// ─── OAuth Bootstrap ─────────────────────────────────────────

/// Query parameters Spotify appends to the redirect URI.
#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct CallbackResponse {
    pub message: String,
    pub code: String,
    pub note: String,
}

/// Acknowledge the redirect of the one-off refresh token bootstrap.
///
/// The code is never exchanged here; the refresh token it yields is
/// configured out of band.
async fn oauth_callback(Query(params): Query<CallbackParams>) -> Result<Json<CallbackResponse>> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Spotify authorization denied");
        return Err(AppError::AuthorizationDenied(error));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AppError::MissingAuthorizationCode)?;

    tracing::info!("Spotify authorization callback received");

    let preview: String = code.chars().take(CODE_PREVIEW_LEN).collect();
    Ok(Json(CallbackResponse {
        message: "Spotify callback received".to_string(),
        code: format!("{}...", preview),
        note: "This endpoint is for the Spotify OAuth flow. Your refresh token should already be configured.".to_string(),
    }))
}
