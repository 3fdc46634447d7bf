//! CLI command definitions and dispatch.

pub mod migrate;
pub mod seed;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use claimdesk_auth::password::{PasswordHasher, PasswordValidator};
use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::{DatabasePool, IdentityStore};
use claimdesk_service::AdminUserService;

use crate::output::OutputFormat;

/// ClaimDesk: accident reports and insurance claims
#[derive(Debug, Parser)]
#[command(name = "claimdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "CLAIMDESK_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay, loaded from `config/{env}.toml`
    #[arg(short, long, env = "CLAIMDESK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate,
    /// Insert the demo identities
    Seed,
    /// Identity management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed => seed::execute(&config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Connect to the configured database.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Identity administration bound to `identities`, without an acting admin.
pub fn admin_service(
    config: &AppConfig,
    identities: Arc<dyn IdentityStore>,
) -> Result<AdminUserService, AppError> {
    Ok(AdminUserService::new(
        identities,
        Arc::new(PasswordHasher::new(&config.auth)?),
        Arc::new(PasswordValidator::new(&config.auth)),
    ))
}
