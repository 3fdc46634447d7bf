//! Accident repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::accident::{Accident, AccidentChanges, AccidentStatus, NewAccident};

use crate::store::AccidentStore;

/// PostgreSQL accident store.
#[derive(Debug, Clone)]
pub struct AccidentRepository {
    pool: PgPool,
}

impl AccidentRepository {
    /// Create a new accident repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccidentStore for AccidentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Accident>> {
        sqlx::query_as::<_, Accident>("SELECT * FROM accidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find accident", e))
    }

    async fn list(&self) -> AppResult<Vec<Accident>> {
        sqlx::query_as::<_, Accident>("SELECT * FROM accidents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accidents", e))
    }

    async fn create(&self, data: &NewAccident) -> AppResult<Accident> {
        let now = Utc::now();
        sqlx::query_as::<_, Accident>(
            "INSERT INTO accidents (id, vehicle_reg, driver_name, driver_license, \
             insurance_company, insurance_policy, location, latitude, longitude, \
             accident_date, police_station, officer_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.vehicle_reg)
        .bind(&data.driver_name)
        .bind(&data.driver_license)
        .bind(&data.insurance_company)
        .bind(&data.insurance_policy)
        .bind(&data.location)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.accident_date)
        .bind(&data.police_station)
        .bind(data.officer_id)
        .bind(AccidentStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create accident", e))
    }

    async fn update(&self, id: Uuid, changes: AccidentChanges) -> AppResult<Accident> {
        let mut accident = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Accident {id} not found")))?;
        accident.apply(changes);

        sqlx::query_as::<_, Accident>(
            "UPDATE accidents SET vehicle_reg = $2, driver_name = $3, driver_license = $4, \
             insurance_company = $5, insurance_policy = $6, location = $7, latitude = $8, \
             longitude = $9, accident_date = $10, police_station = $11, status = $12, \
             updated_at = $13 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&accident.vehicle_reg)
        .bind(&accident.driver_name)
        .bind(&accident.driver_license)
        .bind(&accident.insurance_company)
        .bind(&accident.insurance_policy)
        .bind(&accident.location)
        .bind(accident.latitude)
        .bind(accident.longitude)
        .bind(accident.accident_date)
        .bind(&accident.police_station)
        .bind(accident.status)
        .bind(accident.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update accident", e))?
        .ok_or_else(|| AppError::not_found(format!("Accident {id} not found")))
    }
}
