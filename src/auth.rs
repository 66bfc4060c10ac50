use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AppConfig, Env};

/// Name of the cookie carrying the session token on browser navigations.
pub const SESSION_COOKIE: &str = "session_token";

/// Header honored only in `Env::Local` to impersonate a user without a token.
pub const DEV_USER_HEADER: &str = "x-user-id";

/// AuthStore
///
/// The authentication capability consumed by the navigation guard. Read-only:
/// implementors own their lifecycle, the guard only asks for a snapshot.
pub trait AuthStore {
    fn is_authenticated(&self) -> bool;
}

/// Fixed answer, for wiring the guard without any session machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAuthStore(pub bool);

impl AuthStore for StaticAuthStore {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}

/// Claims
///
/// Payload of a signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user the session belongs to.
    pub sub: Uuid,
    /// Expiration Time (exp): seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat): seconds since the epoch.
    pub iat: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("session token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("session lifetime must be positive")]
    InvalidLifetime,
    #[error("timestamp {0} is before the unix epoch")]
    BeforeEpoch(i64),
}

/// Seconds since the epoch as carried in `Claims`.
fn epoch_seconds(at: DateTime<Utc>) -> Result<usize, AuthError> {
    let seconds = at.timestamp();
    usize::try_from(seconds).map_err(|_| AuthError::BeforeEpoch(seconds))
}

/// issue_token
///
/// Signs a session token for `user_id` valid for `ttl` from now.
pub fn issue_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, AuthError> {
    if ttl <= Duration::zero() {
        return Err(AuthError::InvalidLifetime);
    }

    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: epoch_seconds(now)?,
        exp: epoch_seconds(now + ttl)?,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// verify_token
///
/// Decodes and validates a session token, expiration included.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // Expired means expired: no grace window.
    validation.leeway = 0;

    let data = decode::<Claims>(token, &key, &validation)?;
    Ok(data.claims)
}

/// AuthSession
///
/// Per-request snapshot of the caller's authentication state.
///
/// Unlike a hard authentication extractor this never rejects: a missing,
/// malformed or expired token resolves to an anonymous session, and the
/// navigation guard decides what the visitor may see.
///
/// Resolution order:
/// 1. Local bypass: in `Env::Local`, a UUID in the `x-user-id` header.
/// 2. `Authorization: Bearer <token>`.
/// 3. The `session_token` cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: Option<Uuid>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Resolves the session from request headers against `config`.
    pub fn from_parts(parts: &Parts, config: &AppConfig) -> Self {
        if config.env == Env::Local {
            let bypass = parts
                .headers
                .get(DEV_USER_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|raw| Uuid::parse_str(raw).ok());
            if let Some(user_id) = bypass {
                tracing::debug!(%user_id, "session resolved through local bypass");
                return Self::for_user(user_id);
            }
        }

        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        let token = bearer.or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_owned())
        });

        let Some(token) = token else {
            return Self::anonymous();
        };

        match verify_token(&token, &config.jwt_secret) {
            Ok(claims) => Self::for_user(claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "session token ignored");
                Self::anonymous()
            }
        }
    }
}

impl AuthStore for AuthSession {
    fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        Ok(Self::from_parts(parts, &config))
    }
}
