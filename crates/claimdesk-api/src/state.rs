//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use claimdesk_auth::session::SessionManager;
use claimdesk_core::config::AppConfig;
use claimdesk_database::DatabasePool;
use claimdesk_service::{AccidentService, AdminUserService, ClaimService, UserService};

/// Everything a handler can reach, built once at startup.
///
/// Cloned into every request; all fields are `Arc`s or cheap handles.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on in-memory stores.
    pub db_pool: Option<DatabasePool>,
    /// When the process started serving.
    pub started_at: Instant,

    // Auth
    pub session_manager: Arc<SessionManager>,

    // Services
    pub user_service: Arc<UserService>,
    pub admin_user_service: Arc<AdminUserService>,
    pub accident_service: Arc<AccidentService>,
    pub claim_service: Arc<ClaimService>,
}
