// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required Spotify credentials are not configured.
    #[error("Missing Spotify credentials: {0}")]
    Configuration(String),

    /// The token endpoint rejected the refresh token exchange.
    #[error("Spotify token request failed: HTTP {status}: {body}")]
    UpstreamAuth { status: u16, body: String },

    /// Network failure or timeout talking to Spotify.
    #[error("Spotify request failed: {0}")]
    Transport(String),

    /// Spotify answered with a body we could not use.
    #[error("Unexpected Spotify response: {0}")]
    InvalidResponse(String),

    #[error("Spotify authorization failed: {0}")]
    AuthorizationDenied(String),

    #[error("No authorization code received")]
    MissingAuthorizationCode,
}

/// Public message for failures while building the now-playing view.
const SPOTIFY_FAILURE: &str = "Failed to fetch Spotify data";

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Map a reqwest failure, spelling out timeouts.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Transport(format!("request timed out: {}", err))
        } else {
            AppError::Transport(err.to_string())
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthorizationDenied(_) | AppError::MissingAuthorizationCode => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to a response. `verbose` exposes the underlying error text in
    /// 5xx bodies and is only meant for development.
    pub fn into_response_with(self, verbose: bool) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::AuthorizationDenied(reason) => ErrorResponse {
                error: "Spotify authorization failed".to_string(),
                details: Some(reason),
            },
            AppError::MissingAuthorizationCode => ErrorResponse {
                error: "No authorization code received".to_string(),
                details: None,
            },
            err => ErrorResponse {
                error: SPOTIFY_FAILURE.to_string(),
                details: Some(if verbose {
                    err.to_string()
                } else {
                    "Internal server error".to_string()
                }),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;
