use crate::{
    AppState,
    auth::{AuthSession, AuthStore},
    error::ApiError,
    guard::NavigationGuard,
    models::{ErrorBody, NavigationOutcome, NavigationQuery, RouteDescriptor, ViewDescriptor},
    routes::table::ResolvedRoute,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

// --- View Handler ---

/// render_view
///
/// [Guarded Route] Answers an allowed navigation with the descriptor of the view
/// to mount. Only reached when the navigation guard let the request through; the
/// guard also attaches the `ResolvedRoute` it matched.
pub async fn render_view(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedRoute>,
) -> Json<ViewDescriptor> {
    let entry = resolved.entry;
    let path = state
        .routes
        .href(entry.name, &resolved.params)
        .unwrap_or_else(|| entry.path.to_string());
    Json(ViewDescriptor {
        route: entry.name,
        view: entry.view.to_string(),
        path,
        params: resolved.params.into_iter().collect(),
    })
}

// --- API Handlers ---

/// list_routes
///
/// [Public Route] Returns the static Route Table in registration order.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route Table", body = [RouteDescriptor]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteDescriptor>> {
    let routes = state.routes.entries().iter().map(RouteDescriptor::from).collect();
    Json(routes)
}

/// resolve_navigation
///
/// [Public Route] Resolves `path` against the Route Table and reports what the
/// navigation guard would decide for the caller's current session. Lets a
/// client-side router consult the same rule before it transitions.
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Guard outcome", body = NavigationOutcome),
        (status = 404, description = "Unmatched path", body = ErrorBody)
    )
)]
pub async fn resolve_navigation(
    session: AuthSession,
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationOutcome>, ApiError> {
    let resolved = state
        .routes
        .resolve(&query.path)
        .ok_or_else(|| ApiError::UnknownPath(query.path.clone()))?;

    let decision = NavigationGuard::new(&session).decide(resolved.entry);
    let redirect_to = decision.target();
    let redirect_path = redirect_to
        .and_then(|name| state.routes.href(name, &[]))
        .map(|path| state.config.href(&path));

    Ok(Json(NavigationOutcome {
        route: resolved.entry.name,
        authenticated: session.is_authenticated(),
        allowed: decision.is_allow(),
        redirect_to,
        redirect_path,
    }))
}

/// health
///
/// [Public Route] Liveness probe for load balancers and monitoring.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}
