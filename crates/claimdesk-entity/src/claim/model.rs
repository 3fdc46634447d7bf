//! Insurance claim model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ClaimStatus;

/// An insurance claim raised against an accident report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Claim {
    /// Unique claim identifier.
    pub id: Uuid,
    /// Accident this claim refers to.
    pub accident_id: Uuid,
    /// Agent who lodged the claim.
    pub agent_id: Uuid,
    /// Owning insurance company; drives the own-company gate.
    pub company_id: String,
    /// Insurer's claim reference.
    pub claim_number: String,
    /// Amount claimed.
    pub amount_claimed: f64,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ClaimStatus,
    /// When the claim was created.
    pub created_at: DateTime<Utc>,
    /// When the claim was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to lodge a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClaim {
    pub accident_id: Uuid,
    pub agent_id: Uuid,
    pub company_id: String,
    pub claim_number: String,
    pub amount_claimed: f64,
    pub description: Option<String>,
}

/// Partial update of a claim's details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimChanges {
    pub claim_number: Option<String>,
    pub amount_claimed: Option<f64>,
    pub description: Option<String>,
}

impl Claim {
    /// Apply `changes` in place and bump `updated_at`.
    pub fn apply(&mut self, changes: ClaimChanges) {
        if let Some(v) = changes.claim_number {
            self.claim_number = v;
        }
        if let Some(v) = changes.amount_claimed {
            self.amount_claimed = v;
        }
        if changes.description.is_some() {
            self.description = changes.description;
        }
        self.updated_at = Utc::now();
    }
}
