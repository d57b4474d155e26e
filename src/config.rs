// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Spotify credentials are read once at startup but are allowed to be
//! missing: each `/api/spotify` request re-checks them and fails on its own
//! rather than keeping the whole server from starting.

use std::env;
use std::time::Duration;

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/api/spotify/callback";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_TOKEN_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Deployment environment. Controls how much detail error bodies carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }
}

/// Spotify app credentials. Any member may be absent at load time.
#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: non_empty(client_id.into()),
            client_secret: non_empty(client_secret.into()),
            refresh_token: non_empty(refresh_token.into()),
        }
    }

    /// Names of the environment variables whose values are missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_none() {
            missing.push("SPOTIFY_CLIENT_ID");
        }
        if self.client_secret.is_none() {
            missing.push("SPOTIFY_CLIENT_SECRET");
        }
        if self.refresh_token.is_none() {
            missing.push("SPOTIFY_REFRESH_TOKEN");
        }
        missing
    }
}

// Secrets stay out of logs even when the config is debug-printed.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("has_client_id", &self.client_id.is_some())
            .field("has_client_secret", &self.client_secret.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// Spotify endpoints, timeouts and credentials.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub credentials: Credentials,
    /// Redirect URI registered for the one-off refresh token bootstrap.
    pub redirect_uri: String,
    /// Base URL of the accounts service (token endpoint).
    pub accounts_url: String,
    /// Base URL of the Web API.
    pub api_url: String,
    /// Timeout for the token exchange.
    pub token_timeout: Duration,
    /// Timeout for each data request.
    pub request_timeout: Duration,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    pub environment: Environment,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).and_then(non_empty);

        // NODE_ENV is shared with the frontend tooling and may hold values
        // such as "test", so only APP_ENV is strict.
        let environment = match var("APP_ENV") {
            Some(value) => Environment::parse(&value).ok_or(ConfigError::Invalid {
                var: "APP_ENV",
                value,
            })?,
            None => var("NODE_ENV")
                .and_then(|value| Environment::parse(&value))
                .unwrap_or_default(),
        };

        let spotify = SpotifyConfig {
            credentials: Credentials {
                client_id: var("SPOTIFY_CLIENT_ID"),
                client_secret: var("SPOTIFY_CLIENT_SECRET"),
                refresh_token: var("SPOTIFY_REFRESH_TOKEN"),
            },
            redirect_uri: var("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            accounts_url: trim_base(
                var("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            ),
            api_url: trim_base(
                var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            ),
            token_timeout: seconds(
                "SPOTIFY_TOKEN_TIMEOUT_SECS",
                var("SPOTIFY_TOKEN_TIMEOUT_SECS"),
                DEFAULT_TOKEN_TIMEOUT_SECS,
            )?,
            request_timeout: seconds(
                "SPOTIFY_REQUEST_TIMEOUT_SECS",
                var("SPOTIFY_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        };

        Ok(Self {
            spotify,
            frontend_url: var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            environment,
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
        })
    }

    /// Credentialed config for tests. Endpoints point at an unroutable
    /// address until a test overrides them.
    pub fn test_default() -> Self {
        Self {
            spotify: SpotifyConfig {
                credentials: Credentials::new("test_client_id", "test_secret", "test_refresh"),
                redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
                accounts_url: "http://127.0.0.1:9".to_string(),
                api_url: "http://127.0.0.1:9/v1".to_string(),
                token_timeout: Duration::from_secs(2),
                request_timeout: Duration::from_secs(2),
            },
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            environment: Environment::Development,
            port: 8080,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn seconds(var: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::Invalid { var, value }),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
