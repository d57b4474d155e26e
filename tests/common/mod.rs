// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the Spotify accounts and Web API endpoints.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use portfolio_api::config::Config;
use portfolio_api::routes::create_router;
use portfolio_api::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted reply for one mock endpoint.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
    pub delay: Option<Duration>,
}

#[allow(dead_code)]
impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
            delay: None,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
            delay: None,
        }
    }

    pub fn items(items: Vec<Value>) -> Self {
        Self::ok(json!({ "items": items }))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Replies for every endpoint. Defaults: token `tok1`, nothing playing,
/// both ranking windows empty.
#[derive(Clone)]
pub struct Script {
    pub token: Reply,
    pub current: Reply,
    pub short_term: Reply,
    pub medium_term: Reply,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            token: Reply::ok(json!({
                "access_token": "tok1",
                "token_type": "Bearer",
                "expires_in": 3600
            })),
            current: Reply::no_content(),
            short_term: Reply::items(vec![]),
            medium_term: Reply::items(vec![]),
        }
    }
}

/// Per-endpoint hit counters.
#[derive(Default)]
pub struct Calls {
    pub token: AtomicUsize,
    pub current: AtomicUsize,
    pub short_term: AtomicUsize,
    pub medium_term: AtomicUsize,
}

#[allow(dead_code)]
impl Calls {
    pub fn token(&self) -> usize {
        self.token.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn short_term(&self) -> usize {
        self.short_term.load(Ordering::SeqCst)
    }

    pub fn medium_term(&self) -> usize {
        self.medium_term.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.token() + self.current() + self.short_term() + self.medium_term()
    }
}

/// What the token endpoint received.
#[derive(Clone, Debug)]
pub struct TokenRequest {
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

struct MockState {
    script: Script,
    calls: Arc<Calls>,
    token_requests: Arc<Mutex<Vec<TokenRequest>>>,
    bearers: Arc<Mutex<Vec<String>>>,
}

/// Handle to a running mock server.
#[allow(dead_code)]
pub struct MockSpotify {
    pub base_url: String,
    pub calls: Arc<Calls>,
    pub token_requests: Arc<Mutex<Vec<TokenRequest>>>,
    pub bearers: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockSpotify {
    /// Start the mock on an ephemeral localhost port.
    pub async fn start(script: Script) -> Self {
        let calls = Arc::new(Calls::default());
        let token_requests = Arc::new(Mutex::new(Vec::new()));
        let bearers = Arc::new(Mutex::new(Vec::new()));

        let state = Arc::new(MockState {
            script,
            calls: calls.clone(),
            token_requests: token_requests.clone(),
            bearers: bearers.clone(),
        });

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .route("/v1/me/top/tracks", get(top_tracks))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock Spotify");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            calls,
            token_requests,
            bearers,
        }
    }

    /// Test config pointing at this mock.
    pub fn config(&self) -> Config {
        let mut config = Config::test_default();
        config.spotify.accounts_url = self.base_url.clone();
        config.spotify.api_url = format!("{}/v1", self.base_url);
        config
    }

    pub fn token_requests(&self) -> Vec<TokenRequest> {
        self.token_requests.lock().unwrap().clone()
    }

    pub fn bearers(&self) -> Vec<String> {
        self.bearers.lock().unwrap().clone()
    }
}

async fn respond(reply: Reply) -> Response {
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap();
    match reply.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}

fn record_bearer(state: &MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        state
            .bearers
            .lock()
            .unwrap()
            .push(value.to_str().unwrap_or_default().to_string());
    }
}

async fn token(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.calls.token.fetch_add(1, Ordering::SeqCst);
    state.token_requests.lock().unwrap().push(TokenRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        form,
    });
    respond(state.script.token.clone()).await
}

async fn currently_playing(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.calls.current.fetch_add(1, Ordering::SeqCst);
    record_bearer(&state, &headers);
    respond(state.script.current.clone()).await
}

async fn top_tracks(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record_bearer(&state, &headers);
    assert_eq!(query.get("limit").map(String::as_str), Some("5"));

    match query.get("time_range").map(String::as_str) {
        Some("short_term") => {
            state.calls.short_term.fetch_add(1, Ordering::SeqCst);
            respond(state.script.short_term.clone()).await
        }
        Some("medium_term") => {
            state.calls.medium_term.fetch_add(1, Ordering::SeqCst);
            respond(state.script.medium_term.clone()).await
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// A Web API track object.
#[allow(dead_code)]
pub fn track_json(name: &str, artists: &[&str], image: Option<&str>) -> Value {
    let images: Vec<Value> = image.map(|url| json!({ "url": url })).into_iter().collect();
    json!({
        "name": name,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
        "album": { "images": images },
        "external_urls": {
            "spotify": format!("https://open.spotify.com/track/{}", name.replace(' ', "-"))
        }
    })
}

/// Create the application router against `config`.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
