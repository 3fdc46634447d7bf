//! Claims, scoped to the caller's insurance company.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use claimdesk_auth::rbac::policies::{CLAIM_HANDLERS, INSURANCE_AGENT_ONLY};
use claimdesk_auth::rbac::{require_company_access, require_role};
use claimdesk_core::error::AppError;
use claimdesk_database::store::{AccidentStore, ClaimStore};
use claimdesk_entity::accident::{AccidentChanges, AccidentStatus};
use claimdesk_entity::claim::{Claim, ClaimChanges, ClaimStatus, NewClaim};

use crate::context::RequestContext;
use crate::validation::check;

/// Fields an agent supplies when lodging a claim.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClaimInput {
    /// Accident the claim is raised against.
    pub accident_id: Uuid,
    /// Insurer's claim reference, unique across all claims.
    #[validate(length(min = 1, max = 50, message = "Claim number must be 1-50 characters"))]
    pub claim_number: String,
    /// Amount claimed; must be positive.
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount_claimed: f64,
    /// Free-text description.
    pub description: Option<String>,
}

/// Editable claim details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClaimUpdate {
    /// New claim reference.
    #[validate(length(min = 1, max = 50, message = "Claim number must be 1-50 characters"))]
    pub claim_number: Option<String>,
    /// New amount claimed.
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount_claimed: Option<f64>,
    /// New description.
    pub description: Option<String>,
}

/// Claim service.
#[derive(Debug, Clone)]
pub struct ClaimService {
    claims: Arc<dyn ClaimStore>,
    accidents: Arc<dyn AccidentStore>,
}

impl ClaimService {
    /// Creates a new claim service.
    pub fn new(claims: Arc<dyn ClaimStore>, accidents: Arc<dyn AccidentStore>) -> Self {
        Self { claims, accidents }
    }

    /// List claims: everything for admins, the own company for agents.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Claim>, AppError> {
        require_role(ctx, &CLAIM_HANDLERS)?;
        if ctx.is_admin() {
            return self.claims.list(None).await;
        }
        let company = own_company(ctx)?;
        self.claims.list(Some(company)).await
    }

    /// Fetch one claim.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Claim, AppError> {
        require_role(ctx, &CLAIM_HANDLERS)?;
        let claim = self.find(id).await?;
        require_company_access(ctx, &claim.company_id)?;
        Ok(claim)
    }

    /// Lodge a claim for the caller's company against an existing accident.
    ///
    /// A pending or verified accident moves to `claims_processing`.
    pub async fn create(&self, ctx: &RequestContext, mut input: ClaimInput) -> Result<Claim, AppError> {
        require_role(ctx, &INSURANCE_AGENT_ONLY)?;
        input.claim_number = input.claim_number.trim().to_string();
        check(&input)?;
        let company = own_company(ctx)?.to_string();

        let accident = self
            .accidents
            .find_by_id(input.accident_id)
            .await?
            .ok_or_else(|| AppError::not_found("Accident not found"))?;

        let claim = self
            .claims
            .create(&NewClaim {
                accident_id: accident.id,
                agent_id: ctx.user_id,
                company_id: company,
                claim_number: input.claim_number,
                amount_claimed: input.amount_claimed,
                description: input.description,
            })
            .await?;

        if matches!(
            accident.status,
            AccidentStatus::Pending | AccidentStatus::Verified
        ) {
            let changes = AccidentChanges {
                status: Some(AccidentStatus::ClaimsProcessing),
                ..Default::default()
            };
            if let Err(e) = self.accidents.update(accident.id, changes).await {
                warn!(accident_id = %accident.id, error = %e, "Failed to mark accident as in claims processing");
            }
        }

        info!(
            claim_id = %claim.id,
            accident_id = %claim.accident_id,
            company_id = %claim.company_id,
            agent_id = %ctx.user_id,
            "Claim lodged"
        );
        Ok(claim)
    }

    /// Edit claim details. Closed claims are read-only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut update: ClaimUpdate,
    ) -> Result<Claim, AppError> {
        require_role(ctx, &CLAIM_HANDLERS)?;
        update.claim_number = update.claim_number.map(|n| n.trim().to_string());
        check(&update)?;
        let claim = self.find(id).await?;
        require_company_access(ctx, &claim.company_id)?;
        if claim.status.is_closed() {
            return Err(AppError::validation(format!(
                "Claim is {} and can no longer be edited",
                claim.status
            )));
        }

        let claim = self
            .claims
            .update(
                id,
                ClaimChanges {
                    claim_number: update.claim_number,
                    amount_claimed: update.amount_claimed,
                    description: update.description,
                },
            )
            .await?;
        info!(claim_id = %id, user_id = %ctx.user_id, "Claim updated");
        Ok(claim)
    }

    /// Set the claim status.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: ClaimStatus,
    ) -> Result<Claim, AppError> {
        require_role(ctx, &CLAIM_HANDLERS)?;
        let claim = self.find(id).await?;
        require_company_access(ctx, &claim.company_id)?;

        let updated = self.claims.set_status(id, status).await?;
        info!(
            claim_id = %id,
            user_id = %ctx.user_id,
            from = %claim.status,
            to = %status,
            "Claim status changed"
        );
        Ok(updated)
    }

    async fn find(&self, id: Uuid) -> Result<Claim, AppError> {
        self.claims
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Claim not found"))
    }
}

fn own_company(ctx: &RequestContext) -> Result<&str, AppError> {
    ctx.company_id
        .as_deref()
        .ok_or_else(|| AppError::forbidden("Access denied: no company affiliation"))
}
