// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models returned by `/api/spotify`.

use crate::time_utils::{serialize_opt_utc, serialize_utc};
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A track as shown by the now-playing widget.
///
/// Built from either the currently-playing payload or a top-tracks item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/lib/generated/")
)]
pub struct Track {
    pub title: String,
    /// Artist names joined with ", "
    pub artist: String,
    pub album_image_url: Option<String>,
    pub song_url: String,
    /// Always null for ranked listings, which carry no play time.
    #[serde(serialize_with = "serialize_opt_utc")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub played_at: Option<DateTime<Utc>>,
    /// Only set for the current track.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub is_playing: Option<bool>,
}

/// Response body of `/api/spotify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/lib/generated/")
)]
pub struct NowPlayingView {
    pub current_track: Option<Track>,
    /// Provider ranking order, at most [`crate::services::TOP_TRACKS_LIMIT`] entries.
    pub recent_tracks: Vec<Track>,
    #[serde(serialize_with = "serialize_utc")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn track() -> Track {
        Track {
            title: "Song X".to_string(),
            artist: "Artist Y".to_string(),
            album_image_url: Some("http://img/1.png".to_string()),
            song_url: "https://open.spotify.com/track/1".to_string(),
            played_at: None,
            is_playing: None,
        }
    }

    #[test]
    fn test_ranked_track_serializes_null_played_at() {
        let value = serde_json::to_value(track()).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Song X",
                "artist": "Artist Y",
                "albumImageUrl": "http://img/1.png",
                "songUrl": "https://open.spotify.com/track/1",
                "playedAt": null,
            })
        );
    }

    #[test]
    fn test_current_track_includes_is_playing() {
        let current = Track {
            is_playing: Some(true),
            album_image_url: None,
            ..track()
        };
        let value = serde_json::to_value(current).unwrap();
        assert_eq!(value["isPlaying"], true);
        assert_eq!(value["albumImageUrl"], serde_json::Value::Null);
    }

    #[test]
    fn test_view_shape() {
        let view = NowPlayingView {
            current_track: None,
            recent_tracks: vec![track()],
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["currentTrack"], serde_json::Value::Null);
        assert_eq!(value["recentTracks"].as_array().unwrap().len(), 1);
        assert_eq!(value["timestamp"], "2025-01-02T03:04:05.000Z");
    }
}
