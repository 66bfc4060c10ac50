use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{config::ConfigError, models::ErrorBody};

/// ApiError
///
/// Failures surfaced by the JSON API. Navigations themselves never fail; an
/// unmatched view path is answered by the router's not-found fallback.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no route matches `{0}`")]
    UnknownPath(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownPath(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// StartupError
///
/// Anything that stops the shell before it serves its first request.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}
