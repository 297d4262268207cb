mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::flyover::PassResolver;

pub fn build_router(config: &Config) -> Router {
    let state = Arc::new(AppState {
        resolver: PassResolver::from_config(config),
        default_tz: config.tz.clone(),
    });

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/passes", get(handlers::passes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, config: &Config) -> std::io::Result<()> {
    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("listening on http://{}", addr);
    eprintln!("  ISS flyover server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
