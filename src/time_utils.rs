// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Format a UTC timestamp as RFC3339 with milliseconds and a `Z` suffix
/// (the shape browsers produce with `Date.toISOString()`).
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for [`format_utc_rfc3339`].
pub fn serialize_utc<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_utc_rfc3339(*date))
}

/// Serde adapter for optional timestamps; `None` becomes `null`.
pub fn serialize_opt_utc<S: Serializer>(
    date: &Option<DateTime<Utc>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serialize_utc(date, s),
        None => s.serialize_none(),
    }
}
