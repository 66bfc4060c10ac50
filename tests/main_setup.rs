use nav_shell::{
    AppConfig,
    config::{ConfigError, Env, LOCAL_JWT_SECRET},
};
use serial_test::serial;
use std::{env, panic};

const CONFIG_VARS: [&str; 4] = ["APP_ENV", "SESSION_JWT_SECRET", "BIND_ADDR", "BASE_URL"];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the given variables set (or removed, for `None`) and restores
/// every configuration variable afterward.
fn run_with_env<T, R>(vars: &[(&'static str, Option<&str>)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            if let Some(value) = value {
                env::set_var(key, value);
            }
        }
    }

    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(&[("APP_ENV", Some("production"))], AppConfig::load);

    assert!(
        matches!(result, Err(ConfigError::Missing("SESSION_JWT_SECRET"))),
        "Production config loading should fail on a missing session secret"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_secret() {
    let config = run_with_env(
        &[
            ("APP_ENV", Some("production")),
            ("SESSION_JWT_SECRET", Some("prod-secret")),
            ("BASE_URL", Some("/portal/")),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret, "prod-secret");
    assert_eq!(config.base_url, "/portal");
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", Some("local"))], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.jwt_secret, LOCAL_JWT_SECRET);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.base_url, "/");
}

#[test]
#[serial]
fn test_app_config_rejects_bad_bind_addr() {
    let result = run_with_env(&[("BIND_ADDR", Some("not-an-address"))], AppConfig::load);

    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}
