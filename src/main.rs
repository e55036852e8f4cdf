//! Dashboard API Server
//!
//! Run with: cargo run --bin dashboard
//!
//! # Configuration
//!
//! Read from `./config.toml`, `~/.config/dashboard/config.toml` or
//! `/etc/dashboard/config.toml`, then overridden by `DASHBOARD_*` environment
//! variables (see `dashboard-cli config` for the full list).
//! `RUST_LOG` takes precedence over the configured log level.

use dashboard::api::{serve, AppState};
use dashboard::config::{Config, LoggingConfig};
use dashboard::persistence;
use dashboard::store::{Intent, Store};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Dashboard API server v{}", env!("CARGO_PKG_VERSION"));

    // Durable storage
    let storage = persistence::open_store(&config.storage)?;
    tracing::info!(
        backend = storage.name(),
        data_dir = ?config.storage.data_dir,
        "Durable storage ready"
    );

    // Store
    let store = Arc::new(Store::new(Arc::clone(&storage)));

    if config.store.hydrate_favorites {
        match store.hydrate_favorites() {
            Ok(count) => tracing::info!(count, "Hydrated favorites from durable storage"),
            Err(e) => tracing::warn!(error = %e, "Could not hydrate favorites, starting empty"),
        }
    }

    if let Some(count) = config.store.initial_cart_count {
        store.dispatch(Intent::InitCounterState(count))?;
        tracing::info!(count, "Initialized cart counter");
    }

    // Run server
    let state = AppState::new(Arc::clone(&store), config.api.clone());
    serve(state, &config.api).await?;

    let stats = store.stats()?;
    tracing::info!(
        revision = stats.revision,
        dispatches = stats.dispatches,
        effect_failures = stats.effect_failures,
        "Dashboard API server stopped"
    );

    Ok(())
}

/// Initialize tracing from the logging configuration
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("dashboard={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
