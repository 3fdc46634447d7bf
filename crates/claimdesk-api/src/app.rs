//! Application builder: wires stores, auth, and services into an Axum app.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use claimdesk_auth::jwt::{JwtDecoder, JwtEncoder, RevocationList};
use claimdesk_auth::password::{PasswordHasher, PasswordValidator};
use claimdesk_auth::session::{CredentialAuthenticator, SessionManager};
use claimdesk_core::config::{AppConfig, LoggingConfig};
use claimdesk_core::error::AppError;
use claimdesk_database::{DatabasePool, Stores};
use claimdesk_service::{AccidentService, AdminUserService, ClaimService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Calling this twice is
/// harmless; the second subscriber is simply not installed.
pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Assemble the application state from configuration and a set of stores.
pub fn build_state(
    config: AppConfig,
    stores: Stores,
    db_pool: Option<DatabasePool>,
) -> Result<AppState, AppError> {
    let auth = &config.auth;
    if auth.uses_placeholder_secret() {
        warn!("auth.jwt_secret is the placeholder value; tokens can be forged until it is replaced");
    }

    // Auth
    let password_hasher = Arc::new(PasswordHasher::new(auth)?);
    let password_validator = Arc::new(PasswordValidator::new(auth));
    let revocations = Arc::new(RevocationList::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(auth, Arc::clone(&revocations)));
    let authenticator =
        CredentialAuthenticator::new(Arc::clone(&stores.identities), Arc::clone(&password_hasher));
    let session_manager = Arc::new(SessionManager::new(
        authenticator,
        Arc::clone(&stores.identities),
        jwt_encoder,
        jwt_decoder,
        revocations,
    ));

    // Services
    let user_service = Arc::new(UserService::new(
        Arc::clone(&stores.identities),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
    ));
    let admin_user_service = Arc::new(AdminUserService::new(
        Arc::clone(&stores.identities),
        password_hasher,
        password_validator,
    ));
    let accident_service = Arc::new(AccidentService::new(Arc::clone(&stores.accidents)));
    let claim_service = Arc::new(ClaimService::new(stores.claims, stores.accidents));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        started_at: Instant::now(),
        session_manager,
        user_service,
        admin_user_service,
        accident_service,
        claim_service,
    })
}

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serve `state` on the configured address until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "ClaimDesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("ClaimDesk server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
