use crate::{AppState, handlers, routes::table::RouteTable};
use axum::{Router, routing::get};

/// View Router Module
///
/// Registers a `GET` route for every entry of the Route Table, in table order.
/// Every one of them renders through `handlers::render_view`; the navigation
/// guard layered on top by `create_router` decides whether the request reaches
/// it or is redirected.
///
/// Paths absent from the table are never registered here, so they fall through
/// to the router's not-found fallback without touching the guard.
pub fn view_routes(table: &RouteTable) -> Router<AppState> {
    table
        .entries()
        .iter()
        .fold(Router::new(), |router, entry| {
            router.route(entry.path, get(handlers::render_view))
        })
}
