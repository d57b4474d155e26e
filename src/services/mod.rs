// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - Spotify access and now-playing aggregation.

pub mod now_playing;
pub mod spotify;
pub mod token;

pub use now_playing::{first_non_empty, Fetched, NoData, NowPlayingService};
pub use spotify::{AccessToken, SpotifyClient, TimeRange, TOP_TRACKS_LIMIT};
pub use token::acquire_access_token;
