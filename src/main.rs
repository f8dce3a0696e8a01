//! # News Map
//!
//! Serves a world map of news coverage: crawled articles are read from the
//! article store, bucketed by the countries they mention, and drawn as a
//! choropleth where each country shows its article count and a sample story.
//!
//! ## Usage
//!
//! ```sh
//! DATABASE_URL=sqlite://articles.db news_map -b ./countries_geo.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: CLI flags and env over an optional YAML file
//! 2. **Store**: open the article store connection pool once
//! 3. **Bootstrap**: fetch the boundary geometry once and mount the map
//! 4. **Serve**: answer the read API and the rendered map until a shutdown signal
//! 5. **Teardown**: drain connections and close the store

use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use news_map::bootstrap;
use news_map::cli::Cli;
use news_map::config::{self, FileConfig};
use news_map::geometry::BoundarySource;
use news_map::http::{self, AppState};
use news_map::store::SqlStore;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "news_map starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.port, ?args.boundary_source, "Parsed CLI arguments");

    // ---- Configuration ----
    let file = match args.config.as_deref() {
        Some(path) => match config::load_file(path).await {
            Ok(file) => file,
            Err(e) => {
                error!(path, error = %e, "Could not load config file");
                return Err(e.into());
            }
        },
        None => FileConfig::default(),
    };
    let cfg = match config::resolve(&args, file) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        port = cfg.port,
        database = %cfg.redacted_database_url(),
        boundary_source = %cfg.boundary_source,
        fill_mode = ?cfg.map.fill_mode,
        "Resolved configuration"
    );

    // ---- Article store ----
    let store = match SqlStore::connect(&cfg.database_url).await {
        Ok(store) => store,
        Err(e) => {
            error!(
                database = %cfg.redacted_database_url(),
                error = %e,
                "Could not open article store"
            );
            return Err(e.into());
        }
    };

    // ---- Boundary geometry & map mount ----
    let http_client = reqwest::Client::new();
    let source = BoundarySource::parse(&cfg.boundary_source);
    let map = bootstrap::mount(&source, &http_client, cfg.map.clone()).await;
    if map.is_none() {
        warn!("Serving without a map; /api/map and /countries_geo.json will answer 503");
    }

    // ---- Serve ----
    let app = http::router(AppState::new(Arc::new(store.clone()), map));
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Could not bind listener");
            store.close().await;
            return Err(e.into());
        }
    };
    info!(%addr, "Listening on port {}", cfg.port);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // ---- Teardown ----
    store.close().await;
    if let Err(e) = served {
        error!(error = %e, "Server stopped with an error");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Shutdown complete");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
