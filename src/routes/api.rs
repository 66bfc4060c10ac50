use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// Endpoints reachable by any client, authenticated or not. None of these paths
/// appear in the Route Table, so the navigation guard never sees them.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe.
        .route("/health", get(handlers::health))
        // GET /api/routes
        // The Route Table, so a client-side router can register the same paths.
        .route("/api/routes", get(handlers::list_routes))
        // GET /api/navigation?path=...
        // Guard outcome for the caller's session, without performing the navigation.
        .route("/api/navigation", get(handlers::resolve_navigation))
}
