use nav_shell::{
    AppState, StartupError,
    config::{AppConfig, Env},
    create_router,
};
use axum::{ServiceExt, extract::Request};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, router, HTTP server.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise debug for the shell (guard decisions included).
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nav_shell=debug,tower_http=info".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Navigation shell starting in {:?} mode", config.env);

    let bind_addr = config.bind_addr;
    let base_url = config.base_url.clone();

    // 4. Router and Server Startup
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("Listening on {bind_addr}, shell mounted at {base_url}");
    tracing::info!("API Documentation (Swagger UI) available at: http://{bind_addr}/swagger-ui");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
