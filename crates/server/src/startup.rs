use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{info, warn};

use crate::auth::StaticKeyStore;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Initialize logging in the format named by the configuration.
pub fn init_logging_from(cfg: &AppConfig) {
    match cfg.logging.format.parse::<LogFormat>() {
        Ok(format) => init_logging(format),
        Err(e) => {
            init_logging(LogFormat::Compact);
            warn!(error = %e, "falling back to compact logs");
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Router with every production layer applied.
pub fn build_app(state: ServerState, request_timeout: Duration) -> Router {
    routes::build_router(state, build_cors()).layer(TimeoutLayer::new(request_timeout))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate, bind and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let credentials = Arc::new(StaticKeyStore::from_config(&cfg.auth));
    let state = ServerState::from_db(db, credentials);
    let app = build_app(state, Duration::from_secs(cfg.server.request_timeout_secs));

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, keys = cfg.auth.api_keys.len(), "placement api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
