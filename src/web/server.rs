use crate::config::Config;
use crate::health::HealthState;
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(config: Arc<Config>, health: Arc<HealthState>) -> Result<()> {
    let addr = config.listen_addr();
    let state = AppState::new(config, health);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health endpoint listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_liveness))
        .route("/health", get(handlers::get_liveness))
        .route("/status", get(handlers::get_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
