//! Start the ClaimDesk server.

use std::sync::Arc;

use clap::Args;
use tracing::info;

use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::Stores;
use claimdesk_database::migration::run_migrations;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Keep all data in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,

    /// Insert the demo identities before serving
    #[arg(long)]
    pub seed: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    claimdesk_api::init_tracing(&config.logging);

    output::print_kv("Address", &config.server.bind_address());
    output::print_kv("Storage", if args.in_memory { "in-memory" } else { "postgres" });

    let (stores, db) = if args.in_memory {
        output::print_warning("Running on in-memory stores; data is lost on exit.");
        (Stores::in_memory(), None)
    } else {
        let db = super::connect(&config).await?;
        if !args.no_migrate {
            info!("Running database migrations");
            run_migrations(db.pool()).await?;
        }
        (Stores::postgres(db.pool().clone()), Some(db))
    };

    if args.seed {
        let admin = super::admin_service(&config, Arc::clone(&stores.identities))?;
        super::seed::seed_identities(&admin, stores.identities.as_ref()).await?;
    }

    let state = claimdesk_api::build_state(config, stores, db.clone())?;
    let result = claimdesk_api::serve(state).await;

    if let Some(db) = db {
        db.close().await;
    }
    result
}
