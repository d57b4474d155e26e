// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio API Server
//!
//! Backs the portfolio site's "now playing" widget with data from the
//! owner's Spotify account.

use portfolio_api::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        environment = ?config.environment,
        "Starting Portfolio API"
    );

    // Requests re-check credentials, so a missing one is not fatal here.
    let missing = config.spotify.credentials.missing();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            "Spotify credentials incomplete; /api/spotify will return errors"
        );
    }

    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = portfolio_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("portfolio_api=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
