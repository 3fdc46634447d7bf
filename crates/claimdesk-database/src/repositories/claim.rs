//! Claim repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::claim::{Claim, ClaimChanges, ClaimStatus, NewClaim};

use super::map_write_error;
use crate::store::ClaimStore;

/// PostgreSQL claim store.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Create a new claim repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimStore for ClaimRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Claim>> {
        sqlx::query_as::<_, Claim>("SELECT * FROM claims WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find claim", e))
    }

    async fn list(&self, company_id: Option<&str>) -> AppResult<Vec<Claim>> {
        sqlx::query_as::<_, Claim>(
            "SELECT * FROM claims WHERE ($1::varchar IS NULL OR company_id = $1) \
             ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list claims", e))
    }

    async fn create(&self, data: &NewClaim) -> AppResult<Claim> {
        let now = Utc::now();
        sqlx::query_as::<_, Claim>(
            "INSERT INTO claims (id, accident_id, agent_id, company_id, claim_number, \
             amount_claimed, description, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.accident_id)
        .bind(data.agent_id)
        .bind(&data.company_id)
        .bind(&data.claim_number)
        .bind(data.amount_claimed)
        .bind(&data.description)
        .bind(ClaimStatus::Submitted)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Claim number already exists", "Failed to create claim"))
    }

    async fn update(&self, id: Uuid, changes: ClaimChanges) -> AppResult<Claim> {
        sqlx::query_as::<_, Claim>(
            "UPDATE claims SET \
             claim_number = COALESCE($2, claim_number), \
             amount_claimed = COALESCE($3, amount_claimed), \
             description = COALESCE($4, description), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.claim_number)
        .bind(changes.amount_claimed)
        .bind(changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Claim number already exists", "Failed to update claim"))?
        .ok_or_else(|| AppError::not_found(format!("Claim {id} not found")))
    }

    async fn set_status(&self, id: Uuid, status: ClaimStatus) -> AppResult<Claim> {
        sqlx::query_as::<_, Claim>(
            "UPDATE claims SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update claim status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Claim {id} not found")))
    }
}
