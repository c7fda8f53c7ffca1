use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::repo::seaorm::SeaOrmUserRepository;
use service::blogs::repo::seaorm::SeaOrmBlogRepository;
use service::offerings::repo::seaorm::SeaOrmOfferingRepository;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect to the database and assemble the router over the sea-orm
/// repositories.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let state = ServerState::new(
        Arc::new(SeaOrmUserRepository::new(db.clone())),
        Arc::new(SeaOrmOfferingRepository::new(db.clone())),
        Arc::new(SeaOrmBlogRepository::new(db)),
        &cfg.auth,
    );
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, production = cfg.auth.production, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
