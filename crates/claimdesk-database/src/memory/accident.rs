use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;
use claimdesk_entity::accident::{Accident, AccidentChanges, AccidentStatus, NewAccident};

use crate::store::AccidentStore;

/// Accident store holding reports in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryAccidentStore {
    accidents: DashMap<Uuid, Accident>,
}

impl MemoryAccidentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccidentStore for MemoryAccidentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Accident>> {
        Ok(self.accidents.get(&id).map(|a| a.clone()))
    }

    async fn list(&self) -> AppResult<Vec<Accident>> {
        let mut all: Vec<Accident> = self.accidents.iter().map(|a| a.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn create(&self, data: &NewAccident) -> AppResult<Accident> {
        let now = Utc::now();
        let accident = Accident {
            id: Uuid::new_v4(),
            vehicle_reg: data.vehicle_reg.clone(),
            driver_name: data.driver_name.clone(),
            driver_license: data.driver_license.clone(),
            insurance_company: data.insurance_company.clone(),
            insurance_policy: data.insurance_policy.clone(),
            location: data.location.clone(),
            latitude: data.latitude,
            longitude: data.longitude,
            accident_date: data.accident_date,
            police_station: data.police_station.clone(),
            officer_id: data.officer_id,
            status: AccidentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.accidents.insert(accident.id, accident.clone());
        Ok(accident)
    }

    async fn update(&self, id: Uuid, changes: AccidentChanges) -> AppResult<Accident> {
        let mut accident = self
            .accidents
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Accident {id} not found")))?;
        accident.apply(changes);
        Ok(accident.clone())
    }
}
