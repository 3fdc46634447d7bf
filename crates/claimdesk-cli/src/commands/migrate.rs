//! Database migration command.

use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    println!("Running database migrations...");
    run_migrations(db.pool()).await?;
    db.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
