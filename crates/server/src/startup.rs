use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{routes, state::ServerState};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`); defaults plus env vars only when that file does not exist.
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(&configs::config_path())
}

pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate_from(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) if configs::is_missing_file(&e) => {
            warn!(%path, "config file not found, using defaults and environment");
            AppConfig::from_env()
        }
        Err(e) => Err(e.context(format!("invalid config file {path}"))),
    }
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app from a loaded config and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.database.is_sqlite() {
        runtime::ensure_env(&cfg.database.url).await?;
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;

    let state = ServerState::with_db(db);
    let app: Router = routes::build_router(state, build_cors(), cfg.server.max_body_bytes);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting table state server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
