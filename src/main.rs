// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitlog server
//!
//! Personal food and workout log with Google sign-in.

use anyhow::Context;
use fitlog::{config::Config, db::Db, services::GoogleSignIn, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        storage = ?config.storage_backend,
        "Starting Fitlog"
    );

    let db = Db::connect(&config)
        .await
        .context("Failed to open storage")?;

    let google = GoogleSignIn::from_config(&config).context("Failed to set up Google sign-in")?;
    if google.is_some() {
        tracing::info!(callback = %config.google_callback_url(), "Google sign-in enabled");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google,
    });

    // Build router
    let app = fitlog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitlog=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
