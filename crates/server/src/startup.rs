use std::net::SocketAddr;

use axum::Router;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use service::runtime;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{AppState, ServerAuthConfig};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app from an already validated config and serve until Ctrl+C.
/// Logging is expected to be initialised by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {

    let db = models::db::connect_with_config(&cfg.database).await.map_err(StartupError::from)?;
    if cfg.database.auto_migrate {
        Migrator::up(&db, None).await.map_err(StartupError::from)?;
        info!("migrations applied");
    }

    runtime::ensure_upload_dirs(&cfg.upload.dir).await?;

    let state = AppState::new(
        db,
        ServerAuthConfig { jwt_secret: cfg.auth.jwt_secret.clone() },
        cfg.upload.clone(),
    );
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))?;
    info!(%addr, upload_dir = %cfg.upload.dir, "starting lawdesk server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
