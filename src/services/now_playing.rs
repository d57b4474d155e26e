// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Now-playing aggregation.
//!
//! One request performs:
//! 1. Token exchange (failure aborts the request)
//! 2. Current playback lookup (degrades to `None`)
//! 3. Top tracks lookup over [`RANKING_WINDOWS`] in order (degrades to `[]`)
//!
//! Steps 2 and 3 run concurrently once a token is available. Neither can
//! fail the request; their "no data" outcomes are [`NoData`] values.

use crate::config::Credentials;
use crate::error::{AppError, Result};
use crate::models::{NowPlayingView, Track};
use crate::services::spotify::{AccessToken, SpotifyClient, TimeRange, Upstream, TOP_TRACKS_LIMIT};
use crate::services::token::acquire_access_token;
use chrono::Utc;
use std::future::Future;

/// Top tracks windows, tried in order until one has items.
pub const RANKING_WINDOWS: [TimeRange; 2] = [TimeRange::ShortTerm, TimeRange::MediumTerm];

/// Why a data lookup produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum NoData {
    #[error("nothing is playing")]
    NothingPlaying,

    #[error("no items returned")]
    Empty,

    #[error("Spotify returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error(transparent)]
    Failed(#[from] AppError),
}

impl NoData {
    /// Whether this is an ordinary outcome rather than an upstream problem.
    pub fn is_expected(&self) -> bool {
        matches!(self, NoData::NothingPlaying | NoData::Empty)
    }

    fn log(&self, lookup: &'static str) {
        if self.is_expected() {
            tracing::debug!(lookup, reason = %self, "No Spotify data");
        } else {
            tracing::warn!(lookup, reason = %self, "Spotify lookup degraded");
        }
    }
}

/// Result of a single data lookup.
pub type Fetched<T> = std::result::Result<T, NoData>;

/// Try `sources` in order and return the first non-empty list.
///
/// When every source comes back empty or failed, the reason from the last
/// source is returned.
pub async fn first_non_empty<S, T, F, Fut>(
    sources: impl IntoIterator<Item = S>,
    mut fetch: F,
) -> Fetched<Vec<T>>
where
    F: FnMut(S) -> Fut,
    Fut: Future<Output = Fetched<Vec<T>>>,
{
    let mut last = NoData::Empty;
    for source in sources {
        match fetch(source).await {
            Ok(items) if !items.is_empty() => return Ok(items),
            Ok(_) => last = NoData::Empty,
            Err(reason) => last = reason,
        }
    }
    Err(last)
}

/// Builds the now-playing view from injected credentials.
#[derive(Clone)]
pub struct NowPlayingService {
    client: SpotifyClient,
    credentials: Credentials,
}

impl NowPlayingService {
    pub fn new(client: SpotifyClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Fetch the aggregate view. Only authentication failures are errors.
    pub async fn fetch_now_playing(&self) -> Result<NowPlayingView> {
        let token = acquire_access_token(&self.client, &self.credentials).await?;

        let (current, ranked) = tokio::join!(
            self.current_track(&token),
            self.ranked_tracks(&token)
        );

        let current_track = current
            .inspect_err(|reason| reason.log("currently_playing"))
            .ok();
        let recent_tracks = ranked
            .inspect_err(|reason| reason.log("top_tracks"))
            .unwrap_or_default();

        Ok(NowPlayingView {
            current_track,
            recent_tracks,
            timestamp: Utc::now(),
        })
    }

    /// The track currently playing, if any.
    pub async fn current_track(&self, token: &AccessToken) -> Fetched<Track> {
        match self.client.currently_playing(token).await? {
            Upstream::NoContent => Err(NoData::NothingPlaying),
            Upstream::Status(status) => Err(NoData::UpstreamStatus(status.as_u16())),
            Upstream::Body(body) => body
                .item
                .map(|item| item.into_track(Some(body.is_playing)))
                .ok_or(NoData::NothingPlaying),
        }
    }

    /// Top tracks, falling back through [`RANKING_WINDOWS`].
    pub async fn ranked_tracks(&self, token: &AccessToken) -> Fetched<Vec<Track>> {
        first_non_empty(RANKING_WINDOWS, |range| self.top_tracks(token, range)).await
    }

    /// Top tracks for a single window.
    pub async fn top_tracks(&self, token: &AccessToken, range: TimeRange) -> Fetched<Vec<Track>> {
        let outcome = match self.client.top_tracks(token, range).await {
            Ok(Upstream::Body(body)) => Ok(body
                .items
                .into_iter()
                .take(TOP_TRACKS_LIMIT)
                .map(|item| item.into_track(None))
                .collect::<Vec<_>>()),
            // A 204 here means the same as an empty page.
            Ok(Upstream::NoContent) => Ok(Vec::new()),
            Ok(Upstream::Status(status)) => Err(NoData::UpstreamStatus(status.as_u16())),
            Err(e) => Err(NoData::Failed(e)),
        };

        match &outcome {
            Ok(items) if items.is_empty() => {
                tracing::debug!(time_range = range.as_str(), "Top tracks window empty")
            }
            Err(reason) => {
                tracing::warn!(time_range = range.as_str(), reason = %reason, "Top tracks window failed")
            }
            Ok(_) => {}
        }
        outcome
    }
}
