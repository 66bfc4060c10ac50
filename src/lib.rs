use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::{HeaderMap, HeaderName, StatusCode, Uri, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::{Layer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;

// Navigable views (guarded) and the JSON API (unguarded).
pub mod routes;
use routes::{
    api, views,
    table::{ResolvedRoute, RouteTable},
};

use auth::AuthSession;
use guard::{NavigationGuard, NavigationRequest, Transition};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{ApiError, StartupError};

/// The assembled shell service: the router behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

/// ApiDoc
///
/// OpenAPI document for the JSON endpoints, served at `/api-docs/openapi.json`.
/// View routes are not listed: they are navigations, not API calls.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::resolve_navigation, handlers::health),
    components(
        schemas(
            models::RouteDescriptor, models::ViewDescriptor, models::NavigationOutcome,
            models::ErrorBody, routes::table::RouteName,
        )
    ),
    tags(
        (name = "nav-shell", description = "Navigation shell API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state handed to every request: the loaded configuration
/// and a handle on the Route Table.
#[derive(Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            routes: RouteTable::standard(),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for RouteTable {
    fn from_ref(app_state: &AppState) -> RouteTable {
        app_state.routes
    }
}

/// navigation_guard
///
/// The pre-navigation hook. Installed as a route layer on the view routes, so it
/// only ever sees paths the router matched.
///
/// *Mechanism*: resolves the destination against the Route Table, resolves the
/// previous route from `Referer` when it points into the shell, and lets the
/// `NavigationGuard` decide for the caller's `AuthSession`. On `Continue` the
/// `ResolvedRoute` is attached to the request for the view handler; on
/// `Redirect` the request is answered with `303 See Other` to the target route.
async fn navigation_guard(
    State(state): State<AppState>,
    session: AuthSession,
    mut request: Request,
    next: Next,
) -> Response {
    // A route layer only runs for matched routes, and every view route comes from
    // the table. Stay transparent anyway if the two ever disagree.
    let Some(resolved) = state.routes.resolve(request.uri().path()) else {
        return next.run(request).await;
    };
    let from = referer_route(request.headers(), &state);

    let navigation = NavigationRequest {
        to: resolved.entry,
        from: from.as_ref().map(|route| route.entry),
    };
    let transition = NavigationGuard::new(&session).before_each(navigation, |transition| transition);

    match transition {
        Transition::Continue => {
            request.extensions_mut().insert(resolved);
            next.run(request).await
        }
        Transition::Redirect(target) => {
            // Redirect targets are parameterless routes.
            let Some(path) = state.routes.href(target, &[]) else {
                tracing::error!(%target, "redirect target needs route params");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            Redirect::to(&state.config.href(&path)).into_response()
        }
    }
}

/// Resolves the `Referer` header to a route of this shell, if it names one.
fn referer_route(headers: &HeaderMap, state: &AppState) -> Option<ResolvedRoute> {
    let referer: Uri = headers.get(header::REFERER)?.to_str().ok()?.parse().ok()?;
    let path = referer.path();
    let base = state.config.base_url.as_str();
    let relative = if base == "/" {
        path
    } else {
        let rest = path.strip_prefix(base)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        rest
    };
    state.routes.resolve(relative)
}

/// create_router
///
/// Assembles the shell: guarded view routes, the JSON API and the documentation,
/// mounted under the configured base path, wrapped in the observability layers.
///
/// Trailing slashes are trimmed before routing, so `/login/` reaches the guard
/// exactly like `/login`. The normalization has to sit outside the `Router`:
/// a layer added with `Router::layer` runs after the route was already matched.
pub fn create_router(state: AppState) -> App {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Shell Assembly
    let shell = Router::new()
        // Views: one route per Route Table entry, every one behind the guard.
        .merge(
            views::view_routes(&state.routes)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    navigation_guard,
                )),
        )
        // API: no guard applied.
        .merge(api::api_routes());

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Nesting at the root is not allowed by axum; merge instead.
    let base_router = if state.config.base_url == "/" {
        base_router.merge(shell)
    } else {
        base_router.nest(&state.config.base_url, shell)
    };
    let base_router = base_router.with_state(state);

    // 3. Observability and Correlation Layers
    let router = base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors);

    // 5. Path Normalization (outermost, ahead of routing)
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, URI and the request id, so every log
/// line of one navigation is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::table::RouteName;

    #[test]
    fn referer_outside_base_is_ignored() {
        let mut state = AppState::default();
        state.config.base_url = "/app".to_string();

        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, "http://localhost/other/login".parse().unwrap());
        assert!(referer_route(&headers, &state).is_none());

        headers.insert(header::REFERER, "http://localhost/appx/login".parse().unwrap());
        assert!(referer_route(&headers, &state).is_none());

        headers.insert(header::REFERER, "http://localhost/app/login".parse().unwrap());
        let route = referer_route(&headers, &state).unwrap();
        assert_eq!(route.entry.name, RouteName::Login);
    }
}
