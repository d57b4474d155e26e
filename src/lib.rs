// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Portfolio API: backend for the personal portfolio site.
//!
//! Serves the "now playing" widget by proxying the Spotify Web API through
//! a refresh token owned by the site owner.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::NowPlayingService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub now_playing: NowPlayingService,
}

impl AppState {
    /// Wire services from configuration.
    pub fn new(config: Config) -> Self {
        let client = services::SpotifyClient::new(&config.spotify);
        let now_playing = NowPlayingService::new(client, config.spotify.credentials.clone());
        Self {
            config,
            now_playing,
        }
    }
}
