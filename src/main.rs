//! HTTP server for the benefit calculator.
//!
//! Configured through the environment or a `.env` file:
//!
//! - `BENEFIT_CONFIG_DIR`: directory with the regime YAML files (default `./config/inss`)
//! - `BENEFIT_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `benefit_calculator=debug,info`)

use std::process::ExitCode;

use benefit_calculator::api::{AppState, create_router};
use benefit_calculator::config::{ConfigLoader, ServerSettings};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Read first so a `.env` file can also set RUST_LOG.
    let settings = ServerSettings::load();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("benefit_calculator=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to read server settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let ServerSettings {
        config_dir,
        bind_addr,
    } = settings;

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            error!(config_dir = %config_dir, "Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        regime = %config.regime().code,
        version = %config.regime().version,
        "Configuration loaded"
    );

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %bind_addr, "Failed to bind: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(bind_addr = %bind_addr, "Benefit calculator listening");

    let app = create_router(AppState::new(config));
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
