//! Store traits consumed by the auth and service layers.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory one in [`crate::memory`]. [`Stores`] bundles one of
//! each so the application context can be built from either backend.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::result::AppResult;
use claimdesk_entity::accident::{Accident, AccidentChanges, NewAccident};
use claimdesk_entity::claim::{Claim, ClaimChanges, ClaimStatus, NewClaim};
use claimdesk_entity::user::{CreateUser, User, UserFilter, UserRole};

use crate::memory::{MemoryAccidentStore, MemoryClaimStore, MemoryIdentityStore};
use crate::repositories::{AccidentRepository, ClaimRepository, UserRepository};

/// Identity persistence.
///
/// Emails passed in are expected to be normalized already; lookups are
/// nonetheless case-insensitive.
#[async_trait]
pub trait IdentityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an identity by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find an identity by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List identities matching `filter`, newest first.
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Insert a new identity. Fails with `Conflict` if the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Change the role.
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Activate or deactivate.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User>;

    /// Stamp `last_login_at` with the current time.
    async fn update_last_login(&self, id: Uuid) -> AppResult<()>;
}

/// Accident report persistence.
#[async_trait]
pub trait AccidentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a report by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Accident>>;

    /// List every report, newest first.
    async fn list(&self) -> AppResult<Vec<Accident>>;

    /// File a new report in `pending` status.
    async fn create(&self, data: &NewAccident) -> AppResult<Accident>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update(&self, id: Uuid, changes: AccidentChanges) -> AppResult<Accident>;
}

/// Claim persistence.
#[async_trait]
pub trait ClaimStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a claim by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Claim>>;

    /// List claims, optionally restricted to one company, newest first.
    async fn list(&self, company_id: Option<&str>) -> AppResult<Vec<Claim>>;

    /// Lodge a new claim in `submitted` status.
    /// Fails with `Conflict` if the claim number is taken.
    async fn create(&self, data: &NewClaim) -> AppResult<Claim>;

    /// Apply a partial update to the claim details.
    async fn update(&self, id: Uuid, changes: ClaimChanges) -> AppResult<Claim>;

    /// Move the claim to `status`.
    async fn set_status(&self, id: Uuid, status: ClaimStatus) -> AppResult<Claim>;
}

/// One instance of every store, shared behind `Arc`s.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Identity store.
    pub identities: Arc<dyn IdentityStore>,
    /// Accident store.
    pub accidents: Arc<dyn AccidentStore>,
    /// Claim store.
    pub claims: Arc<dyn ClaimStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing `pool`.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            identities: Arc::new(UserRepository::new(pool.clone())),
            accidents: Arc::new(AccidentRepository::new(pool.clone())),
            claims: Arc::new(ClaimRepository::new(pool)),
        }
    }

    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            identities: Arc::new(MemoryIdentityStore::new()),
            accidents: Arc::new(MemoryAccidentStore::new()),
            claims: Arc::new(MemoryClaimStore::new()),
        }
    }
}
