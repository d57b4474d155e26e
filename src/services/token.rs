// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token acquisition from the configured refresh token.

use crate::config::Credentials;
use crate::error::{AppError, Result};
use crate::services::spotify::{AccessToken, SpotifyClient};

/// Exchange the configured refresh token for a bearer token.
///
/// Fails with [`AppError::Configuration`] before touching the network when
/// any credential is missing. There is no retry and no caching; every call
/// performs a fresh exchange.
pub async fn acquire_access_token(
    client: &SpotifyClient,
    credentials: &Credentials,
) -> Result<AccessToken> {
    let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
        credentials.client_id.as_deref(),
        credentials.client_secret.as_deref(),
        credentials.refresh_token.as_deref(),
    ) else {
        let missing = credentials.missing();
        tracing::error!(missing = ?missing, "Spotify credentials not configured");
        return Err(AppError::Configuration(missing.join(", ")));
    };

    client
        .refresh_access_token(client_id, client_secret, refresh_token)
        .await
}
