use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check (outside /api prefix)
        .route("/health", get(handlers::health))
        // Catalogue browsing
        .route("/api/san", get(handlers::list_sans))
        .route("/api/san/{san}", get(handlers::lookup_san))
        // Geometry and disambiguation queries
        .route("/api/attacks/{piece}/{square}", get(handlers::attacks))
        .route(
            "/api/discriminators/{piece}/{square}",
            get(handlers::discriminators),
        )
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
