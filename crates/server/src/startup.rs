use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::AppState;
use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already migrated database. Fails if the handler registry is incomplete.
pub fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> Result<Router, StartupError> {
    let dispatcher = service::build_dispatcher(&db)?;
    let state = AppState::new(dispatcher, cfg.auth.api_key.as_str());
    Ok(routes::build_router(state, build_cors(), cfg.server.enable_docs))
}

async fn connect_and_migrate(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::ping(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("migrations applied");
    Ok(db)
}

/// Connect, migrate, validate the handler registry, then serve until `shutdown` fires.
pub async fn run(cfg: AppConfig, shutdown: CancellationToken) -> Result<(), StartupError> {
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;

    let db = connect_and_migrate(&cfg).await?;
    let app = build_app(db, &cfg)?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, docs = cfg.server.enable_docs, "catalog api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(anyhow::Error::from)?;
    info!("server stopped");
    Ok(())
}
