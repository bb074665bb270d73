//! Server startup
//!
//! Loads configuration, opens the store, wires the session backend, and
//! serves the API until interrupted. Configurable via config.toml.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use voiceforge_api::{build_router, AppState};
use voiceforge_auth::SqliteSessionStore;
use voiceforge_config::Config;
use voiceforge_store::Store;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database file path (overrides config)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Run the server
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = args.db {
        config.database.path = Some(db);
    }

    let db_path = config.database.db_path();
    let store = Store::open(&db_path)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    info!(path = %db_path.display(), "database ready");

    // Sessions live in the same database as the application data
    let sessions = SqliteSessionStore::new(store.pool().clone(), Some(config.auth.session_ttl()))
        .await
        .context("failed to initialize session store")?;

    if config.auth.dev_sessions {
        warn!("dev sessions enabled - POST /api/auth/session is open");
    }

    let state =
        AppState::new(store, Arc::new(sessions)).with_dev_sessions(config.auth.dev_sessions);

    let app = build_router(state).layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(addr = %addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Load config from an explicit path, or defaults when none given
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Resolve on ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
