// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify Web API client.
//!
//! Handles:
//! - Refresh token exchange against the accounts service
//! - Currently playing and top tracks lookups
//! - Per-request timeouts
//!
//! Status policy (what counts as "no data") lives in the now-playing
//! service; this client only classifies responses into [`Upstream`].

use crate::config::SpotifyConfig;
use crate::error::{AppError, Result};
use crate::models::Track;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{header, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Page size requested from the top tracks endpoint.
pub const TOP_TRACKS_LIMIT: usize = 5;

/// Ranking window for the top tracks endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// Roughly the last four weeks.
    ShortTerm,
    /// Roughly the last six months.
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Short-lived bearer token. Lives for one request only.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Classified response of a data endpoint.
#[derive(Debug)]
pub enum Upstream<T> {
    /// HTTP 204
    NoContent,
    /// Any status above 400, body discarded.
    Status(StatusCode),
    Body(T),
}

/// Build the `Authorization: Basic` value for the client credentials.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Spotify API client.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    accounts_url: String,
    api_url: String,
    token_timeout: Duration,
    request_timeout: Duration,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            accounts_url: config.accounts_url.clone(),
            api_url: config.api_url.clone(),
            token_timeout: config.token_timeout,
            request_timeout: config.request_timeout,
        }
    }

    /// Exchange a refresh token for a fresh access token.
    pub async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_url);

        let response = self
            .http
            .post(&url)
            .header(
                header::AUTHORIZATION,
                basic_authorization(client_id, client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .timeout(self.token_timeout)
            .send()
            .await
            .map_err(AppError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Spotify token request rejected");
            return Err(AppError::UpstreamAuth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::transport(e)
            } else {
                AppError::InvalidResponse(format!("token response: {}", e))
            }
        })?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => {
                tracing::debug!(expires_in = ?token.expires_in, "Spotify access token acquired");
                Ok(AccessToken(access_token))
            }
            _ => Err(AppError::InvalidResponse(
                "token response has no access_token".to_string(),
            )),
        }
    }

    /// Current playback state of the token owner.
    pub async fn currently_playing(
        &self,
        token: &AccessToken,
    ) -> Result<Upstream<CurrentlyPlayingResponse>> {
        let url = format!("{}/me/player/currently-playing", self.api_url);
        self.get_json(&url, token, &[]).await
    }

    /// Ranked top tracks of the token owner over `range`.
    pub async fn top_tracks(
        &self,
        token: &AccessToken,
        range: TimeRange,
    ) -> Result<Upstream<TopTracksResponse>> {
        let url = format!("{}/me/top/tracks", self.api_url);
        let limit = TOP_TRACKS_LIMIT.to_string();
        self.get_json(
            &url,
            token,
            &[("limit", limit.as_str()), ("time_range", range.as_str())],
        )
        .await
    }

    /// Generic GET with bearer auth, classified into [`Upstream`].
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        token: &AccessToken,
        query: &[(&str, &str)],
    ) -> Result<Upstream<T>> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .query(query)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(AppError::transport)?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Upstream::NoContent);
        }
        if status.as_u16() > 400 {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %body, url, "Spotify request failed");
            return Ok(Upstream::Status(status));
        }

        response.json().await.map(Upstream::Body).map_err(|e| {
            if e.is_timeout() {
                AppError::transport(e)
            } else {
                AppError::InvalidResponse(format!("JSON parse error: {}", e))
            }
        })
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `GET /me/player/currently-playing` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<SpotifyTrack>,
}

/// `GET /me/top/tracks` body.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

/// Track object as returned by the Web API (only the fields we use).
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub album: Option<SpotifyAlbum>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

/// Local files have no Spotify URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

impl SpotifyTrack {
    /// Flatten into the widget's track shape.
    pub fn into_track(self, is_playing: Option<bool>) -> Track {
        let artist = self
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let album_image_url = self
            .album
            .and_then(|album| album.images.into_iter().next())
            .map(|image| image.url);

        Track {
            title: self.name,
            artist,
            album_image_url,
            song_url: self.external_urls.spotify.unwrap_or_default(),
            played_at: None,
            is_playing,
        }
    }
}
