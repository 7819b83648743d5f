use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::QueryService;

pub mod routes;

/// Server state
pub struct AppState {
    pub service: Arc<QueryService>,
}

/// Routes for the dictionary JSON API
pub fn router(service: Arc<QueryService>) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/languages", get(routes::languages))
        .route("/api/search", get(routes::search))
        .route("/api/random", get(routes::random))
        .route("/api/stats", get(routes::stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until the process is stopped.
///
/// The caller is expected to have run `ensure_ready`; requests against a
/// service that isn't ready get `503 Service Unavailable`.
pub async fn start_server(addr: SocketAddr, service: Arc<QueryService>) -> anyhow::Result<()> {
    let app = router(service);

    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
