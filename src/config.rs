use std::{env, net::SocketAddr};

/// Fallback signing secret for local sessions. Never accepted in production.
pub const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";

/// AppConfig
///
/// Holds the shell's configuration. Immutable once loaded and shared with every
/// request through `AppState` and `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local authentication bypass and log format.
    pub env: Env,
    // Secret used to sign and validate session tokens.
    pub jwt_secret: String,
    // Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    // Base path the shell is mounted under. Always starts with '/', never ends with one unless root.
    pub base_url: String,
}

/// Env
///
/// Runtime context: development conveniences in `Local`, hardened behavior in `Production`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("BIND_ADDR `{value}` is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

impl Default for AppConfig {
    /// Local configuration with no environment lookups, for tests and scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            base_url: "/".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from the environment at startup.
    ///
    /// # Errors
    /// Fails fast when `SESSION_JWT_SECRET` is missing in production or when
    /// `BIND_ADDR` cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("SESSION_JWT_SECRET").map_err(|_| ConfigError::Missing("SESSION_JWT_SECRET"))?
            }
            Env::Local => env::var("SESSION_JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(value) => value
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?,
            Err(_) => AppConfig::default().bind_addr,
        };

        let base_url = normalize_base_url(&env::var("BASE_URL").unwrap_or_default());

        Ok(Self {
            env,
            jwt_secret,
            bind_addr,
            base_url,
        })
    }

    /// Prefixes an absolute route path with the base path.
    pub fn href(&self, path: &str) -> String {
        if self.base_url == "/" {
            path.to_string()
        } else if path == "/" {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

/// Normalizes a base path: leading slash, no trailing slash, empty means root.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
