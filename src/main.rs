// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion-Relay API Server
//!
//! Serves the same-origin forwarding endpoint that attaches the Notion
//! integration token to admin UI requests.

use notion_relay::{config::Config, services::HttpUpstream, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Notion-Relay");

    if config.notion_api_key.is_none() {
        // Not fatal at startup: every proxied request answers 500 until fixed.
        tracing::error!("CRITICAL: NOTION_API_KEY environment variable not found");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        upstream: Arc::new(HttpUpstream::new()),
    });

    // Build router
    let app = notion_relay::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notion_relay=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
