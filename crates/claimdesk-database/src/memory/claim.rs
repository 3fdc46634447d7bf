use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;
use claimdesk_entity::claim::{Claim, ClaimChanges, ClaimStatus, NewClaim};

use crate::store::ClaimStore;

/// Claim store holding claims in a concurrent map, with a claim-number index.
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    claims: DashMap<Uuid, Claim>,
    numbers: DashMap<String, Uuid>,
}

impl MemoryClaimStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Claim>> {
        Ok(self.claims.get(&id).map(|c| c.clone()))
    }

    async fn list(&self, company_id: Option<&str>) -> AppResult<Vec<Claim>> {
        let mut claims: Vec<Claim> = self
            .claims
            .iter()
            .filter(|c| company_id.is_none_or(|company| c.company_id == company))
            .map(|c| c.value().clone())
            .collect();
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(claims)
    }

    async fn create(&self, data: &NewClaim) -> AppResult<Claim> {
        let Entry::Vacant(slot) = self.numbers.entry(data.claim_number.clone()) else {
            return Err(AppError::conflict("Claim number already exists"));
        };
        let now = Utc::now();
        let claim = Claim {
            id: Uuid::new_v4(),
            accident_id: data.accident_id,
            agent_id: data.agent_id,
            company_id: data.company_id.clone(),
            claim_number: data.claim_number.clone(),
            amount_claimed: data.amount_claimed,
            description: data.description.clone(),
            status: ClaimStatus::Submitted,
            created_at: now,
            updated_at: now,
        };
        self.claims.insert(claim.id, claim.clone());
        slot.insert(claim.id);
        Ok(claim)
    }

    async fn update(&self, id: Uuid, mut changes: ClaimChanges) -> AppResult<Claim> {
        let mut claim = self
            .claims
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Claim {id} not found")))?;

        if let Some(number) = changes.claim_number.take() {
            if number != claim.claim_number {
                match self.numbers.entry(number.clone()) {
                    Entry::Occupied(_) => {
                        return Err(AppError::conflict("Claim number already exists"));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
                self.numbers.remove(&claim.claim_number);
                claim.claim_number = number;
            }
        }

        claim.apply(changes);
        Ok(claim.clone())
    }

    async fn set_status(&self, id: Uuid, status: ClaimStatus) -> AppResult<Claim> {
        let mut claim = self
            .claims
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Claim {id} not found")))?;
        claim.status = status;
        claim.updated_at = Utc::now();
        Ok(claim.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_core::ErrorKind;

    fn new_claim(number: &str, company: &str) -> NewClaim {
        NewClaim {
            accident_id: Uuid::new_v4(),
            agent_id: Uuid::new_v4(),
            company_id: company.to_string(),
            claim_number: number.to_string(),
            amount_claimed: 125_000.0,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_by_company() {
        let store = MemoryClaimStore::new();
        store.create(&new_claim("CLM-1", "INS001")).await.unwrap();
        store.create(&new_claim("CLM-2", "INS002")).await.unwrap();
        assert_eq!(store.list(None).await.unwrap().len(), 2);
        let ins1 = store.list(Some("INS001")).await.unwrap();
        assert_eq!(ins1.len(), 1);
        assert_eq!(ins1[0].claim_number, "CLM-1");
    }

    #[tokio::test]
    async fn test_claim_number_unique_across_renames() {
        let store = MemoryClaimStore::new();
        let first = store.create(&new_claim("CLM-1", "INS001")).await.unwrap();
        store.create(&new_claim("CLM-2", "INS001")).await.unwrap();

        let err = store
            .update(
                first.id,
                ClaimChanges {
                    claim_number: Some("CLM-2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let renamed = store
            .update(
                first.id,
                ClaimChanges {
                    claim_number: Some("CLM-3".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.claim_number, "CLM-3");
        // the old number is free again
        store.create(&new_claim("CLM-1", "INS002")).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_status() {
        let store = MemoryClaimStore::new();
        let claim = store.create(&new_claim("CLM-9", "INS001")).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Submitted);
        let claim = store
            .set_status(claim.id, ClaimStatus::UnderReview)
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::UnderReview);
    }
}
