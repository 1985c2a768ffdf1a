//! # hemad — training calendar daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hema.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Seed the in-memory event source
//! - Construct application services, injecting the source via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use hema_adapter_http_axum::state::AppState;
use hema_adapter_memory::InMemoryEventSource;
use hema_app::ports::SystemClock;
use hema_app::services::calendar_service::CalendarService;
use hema_app::services::event_service::EventService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Event source
    let source = match &config.events.seed_path {
        Some(path) => InMemoryEventSource::from_file(path)?,
        None => {
            tracing::info!("no seed file configured, starting with an empty event store");
            InMemoryEventSource::default()
        }
    };
    let source = Arc::new(source);

    // Services
    let zone = config.timezone()?;
    let calendar_service = CalendarService::new(Arc::clone(&source), SystemClock, zone);
    let event_service = EventService::new(source);

    // HTTP
    let state = AppState::new(calendar_service, event_service, config.display);
    let app = hema_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, timezone = %zone, "hemad listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hemad stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
