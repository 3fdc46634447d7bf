//! ClaimDesk Server: accident reports and insurance claims.
//!
//! Main entry point that wires all crates together and starts the server.

use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::migration::run_migrations;
use claimdesk_database::{DatabasePool, Stores};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    claimdesk_api::init_tracing(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("CLAIMDESK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("CLAIMDESK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&config_path, &env)
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting ClaimDesk");

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    let stores = Stores::postgres(db.pool().clone());
    let state = claimdesk_api::build_state(config, stores, Some(db.clone()))?;
    let result = claimdesk_api::serve(state).await;

    db.close().await;
    result
}
