use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use chrono::Duration;
use jsonwebtoken::{EncodingKey, Header, encode};
use nav_shell::{
    AppState,
    auth::{AuthSession, AuthStore, Claims, DEV_USER_HEADER, SESSION_COOKIE, issue_token},
    config::Env,
};
use std::time::SystemTime;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn create_expired_token(user_id: Uuid) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        sub: user_id,
        iat: (now - 7200) as usize,
        exp: (now - 3600) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_app_state(env: Env) -> AppState {
    let mut state = AppState::default();
    state.config.env = env;
    state.config.jwt_secret = TEST_JWT_SECRET.to_string();
    state
}

fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

async fn resolve(parts: &mut Parts, state: &AppState) -> AuthSession {
    match AuthSession::from_request_parts(parts, state).await {
        Ok(session) => session,
        Err(never) => match never {},
    }
}

// --- Tests ---

#[tokio::test]
async fn test_bearer_token_authenticates() {
    let token = issue_token(TEST_USER_ID, TEST_JWT_SECRET, Duration::hours(1)).unwrap();
    let state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/home".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert!(session.is_authenticated());
    assert_eq!(session.user_id, Some(TEST_USER_ID));
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let token = issue_token(TEST_USER_ID, TEST_JWT_SECRET, Duration::hours(1)).unwrap();
    let state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/home".parse().unwrap());
    parts.headers.insert(
        header::COOKIE,
        header::HeaderValue::from_str(&format!("theme=light; {SESSION_COOKIE}={token}")).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert_eq!(session.user_id, Some(TEST_USER_ID));
}

#[tokio::test]
async fn test_missing_credentials_is_anonymous() {
    let state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let session = resolve(&mut parts, &state).await;

    assert_eq!(session, AuthSession::anonymous());
}

#[tokio::test]
async fn test_expired_token_is_anonymous() {
    let state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/home".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", create_expired_token(TEST_USER_ID))).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_anonymous() {
    let token = issue_token(TEST_USER_ID, "someone-elses-secret", Duration::hours(1)).unwrap();
    let state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/home".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_local_bypass_success() {
    let mock_user_id = Uuid::new_v4();
    let state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/admin".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static(DEV_USER_HEADER),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert_eq!(session.user_id, Some(mock_user_id));
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let mock_user_id = Uuid::new_v4();
    let state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/admin".parse().unwrap());
    // Provide ONLY the local bypass header
    parts.headers.insert(
        header::HeaderName::from_static(DEV_USER_HEADER),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let session = resolve(&mut parts, &state).await;

    assert!(!session.is_authenticated());
}
