//! Role-gated access to accident reports.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use claimdesk_auth::rbac::policies::{ACCIDENT_EDITORS, ACCIDENT_READERS, POLICE_ONLY};
use claimdesk_auth::rbac::require_role;
use claimdesk_core::error::AppError;
use claimdesk_database::store::AccidentStore;
use claimdesk_entity::accident::{Accident, AccidentChanges, AccidentStatus, NewAccident};

use crate::context::RequestContext;
use crate::validation::check;

/// Fields an officer supplies when filing a report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccidentInput {
    /// Registration plate, stored upper-cased.
    #[validate(length(min = 1, max = 20, message = "Vehicle registration must be 1-20 characters"))]
    pub vehicle_reg: String,
    /// Driver's full name.
    #[validate(length(min = 1, max = 100, message = "Driver name must be 1-100 characters"))]
    pub driver_name: String,
    /// Driver's licence number.
    #[validate(length(max = 50))]
    pub driver_license: Option<String>,
    /// Insurer of the vehicle.
    #[validate(length(min = 1, max = 100, message = "Insurance company is required"))]
    pub insurance_company: String,
    /// Policy number with that insurer.
    #[validate(length(max = 50))]
    pub insurance_policy: Option<String>,
    /// Free-text location.
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    /// Latitude in degrees, -90 to 90.
    pub latitude: Option<f64>,
    /// Longitude in degrees, -180 to 180.
    pub longitude: Option<f64>,
    /// When the accident happened; never in the future.
    pub accident_date: DateTime<Utc>,
    /// Reporting police station.
    #[validate(length(min = 1, max = 100, message = "Police station is required"))]
    pub police_station: String,
}

/// Amendments to a filed report. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccidentUpdate {
    /// Registration plate, stored upper-cased.
    #[validate(length(min = 1, max = 20, message = "Vehicle registration must be 1-20 characters"))]
    pub vehicle_reg: Option<String>,
    /// Driver's full name.
    #[validate(length(min = 1, max = 100, message = "Driver name must be 1-100 characters"))]
    pub driver_name: Option<String>,
    /// Driver's licence number.
    #[validate(length(max = 50))]
    pub driver_license: Option<String>,
    /// Insurer of the vehicle.
    #[validate(length(min = 1, max = 100, message = "Insurance company is required"))]
    pub insurance_company: Option<String>,
    /// Policy number with that insurer.
    #[validate(length(max = 50))]
    pub insurance_policy: Option<String>,
    /// Free-text location.
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: Option<String>,
    /// Latitude in degrees, -90 to 90.
    pub latitude: Option<f64>,
    /// Longitude in degrees, -180 to 180.
    pub longitude: Option<f64>,
    /// When the accident happened; never in the future.
    pub accident_date: Option<DateTime<Utc>>,
    /// Reporting police station.
    #[validate(length(min = 1, max = 100, message = "Police station is required"))]
    pub police_station: Option<String>,
    /// Processing status.
    pub status: Option<AccidentStatus>,
}

impl From<AccidentUpdate> for AccidentChanges {
    fn from(u: AccidentUpdate) -> Self {
        AccidentChanges {
            vehicle_reg: u.vehicle_reg,
            driver_name: u.driver_name,
            driver_license: u.driver_license,
            insurance_company: u.insurance_company,
            insurance_policy: u.insurance_policy,
            location: u.location,
            latitude: u.latitude,
            longitude: u.longitude,
            accident_date: u.accident_date,
            police_station: u.police_station,
            status: u.status,
        }
    }
}

/// Accident report service.
#[derive(Debug, Clone)]
pub struct AccidentService {
    accidents: Arc<dyn AccidentStore>,
}

impl AccidentService {
    /// Creates a new accident service.
    pub fn new(accidents: Arc<dyn AccidentStore>) -> Self {
        Self { accidents }
    }

    /// List all reports.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Accident>, AppError> {
        require_role(ctx, &ACCIDENT_READERS)?;
        self.accidents.list().await
    }

    /// Fetch one report.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Accident, AppError> {
        require_role(ctx, &ACCIDENT_READERS)?;
        self.find(id).await
    }

    /// File a report on behalf of the calling officer.
    pub async fn create(&self, ctx: &RequestContext, mut input: AccidentInput) -> Result<Accident, AppError> {
        require_role(ctx, &POLICE_ONLY)?;
        input.vehicle_reg = normalize_reg(&input.vehicle_reg);
        check(&input)?;
        check_report_fields(input.latitude, input.longitude, Some(input.accident_date))?;

        let accident = self
            .accidents
            .create(&NewAccident {
                vehicle_reg: input.vehicle_reg,
                driver_name: input.driver_name,
                driver_license: input.driver_license,
                insurance_company: input.insurance_company,
                insurance_policy: input.insurance_policy,
                location: input.location,
                latitude: input.latitude,
                longitude: input.longitude,
                accident_date: input.accident_date,
                police_station: input.police_station,
                officer_id: ctx.user_id,
            })
            .await?;

        info!(accident_id = %accident.id, officer_id = %ctx.user_id, "Accident reported");
        Ok(accident)
    }

    /// Amend a report.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut update: AccidentUpdate,
    ) -> Result<Accident, AppError> {
        require_role(ctx, &ACCIDENT_EDITORS)?;
        update.vehicle_reg = update.vehicle_reg.as_deref().map(normalize_reg);
        check(&update)?;
        check_report_fields(update.latitude, update.longitude, update.accident_date)?;

        let accident = self.accidents.update(id, update.into()).await?;
        info!(accident_id = %id, user_id = %ctx.user_id, status = %accident.status, "Accident updated");
        Ok(accident)
    }

    async fn find(&self, id: Uuid) -> Result<Accident, AppError> {
        self.accidents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Accident not found"))
    }
}

fn normalize_reg(reg: &str) -> String {
    reg.trim().to_uppercase()
}

/// Coordinate ranges and the no-future-date rule, shared by filing and amending.
fn check_report_fields(
    latitude: Option<f64>,
    longitude: Option<f64>,
    accident_date: Option<DateTime<Utc>>,
) -> Result<(), AppError> {
    if latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat))
        || longitude.is_some_and(|lon| !(-180.0..=180.0).contains(&lon))
    {
        return Err(AppError::validation("Coordinates are out of range"));
    }
    if accident_date.is_some_and(|date| date > Utc::now()) {
        return Err(AppError::validation("accident_date cannot be in the future"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_core::ErrorKind;
    use claimdesk_database::memory::MemoryAccidentStore;
    use claimdesk_entity::user::UserRole;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext {
            user_id: Uuid::new_v4(),
            email: "someone@x.com".into(),
            role,
            company_id: None,
            request_time: Utc::now(),
        }
    }

    fn input() -> AccidentInput {
        AccidentInput {
            vehicle_reg: "kca 123a".into(),
            driver_name: "John Kamau".into(),
            driver_license: None,
            insurance_company: "Kenya Insurance".into(),
            insurance_policy: Some("POL-001".into()),
            location: "Mombasa Road".into(),
            latitude: Some(-1.3),
            longitude: Some(36.8),
            accident_date: Utc::now() - chrono::Duration::hours(2),
            police_station: "Central".into(),
        }
    }

    #[tokio::test]
    async fn test_police_files_report() {
        let svc = AccidentService::new(Arc::new(MemoryAccidentStore::new()));
        let officer = ctx(UserRole::Police);
        let accident = svc.create(&officer, input()).await.unwrap();
        assert_eq!(accident.officer_id, officer.user_id);
        assert_eq!(accident.vehicle_reg, "KCA 123A");
        assert_eq!(accident.status, AccidentStatus::Pending);
    }

    #[tokio::test]
    async fn test_gates() {
        let svc = AccidentService::new(Arc::new(MemoryAccidentStore::new()));
        let agent = ctx(UserRole::InsuranceAgent);
        assert_eq!(
            svc.create(&agent, input()).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );
        assert_eq!(
            svc.create(&ctx(UserRole::Admin), input()).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );

        let accident = svc.create(&ctx(UserRole::Police), input()).await.unwrap();
        assert!(svc.get(&agent, accident.id).await.is_ok());
        assert_eq!(svc.list(&agent).await.unwrap().len(), 1);

        let changes = AccidentUpdate {
            status: Some(AccidentStatus::Verified),
            ..Default::default()
        };
        assert_eq!(
            svc.update(&agent, accident.id, changes.clone())
                .await
                .unwrap_err()
                .kind,
            ErrorKind::Forbidden
        );
        let updated = svc
            .update(&ctx(UserRole::Admin), accident.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.status, AccidentStatus::Verified);
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let svc = AccidentService::new(Arc::new(MemoryAccidentStore::new()));
        let officer = ctx(UserRole::Police);

        let mut bad = input();
        bad.latitude = Some(120.0);
        assert_eq!(
            svc.create(&officer, bad).await.unwrap_err().kind,
            ErrorKind::Validation
        );

        let mut future = input();
        future.accident_date = Utc::now() + chrono::Duration::days(1);
        assert_eq!(
            svc.create(&officer, future).await.unwrap_err().kind,
            ErrorKind::Validation
        );

        assert_eq!(
            svc.get(&officer, Uuid::new_v4()).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_update_applies_filing_rules() {
        let svc = AccidentService::new(Arc::new(MemoryAccidentStore::new()));
        let officer = ctx(UserRole::Police);
        let accident = svc.create(&officer, input()).await.unwrap();

        let rejected = [
            AccidentUpdate {
                latitude: Some(999.0),
                ..Default::default()
            },
            AccidentUpdate {
                longitude: Some(-181.0),
                ..Default::default()
            },
            AccidentUpdate {
                accident_date: Some(Utc::now() + chrono::Duration::days(365)),
                ..Default::default()
            },
            AccidentUpdate {
                driver_name: Some(String::new()),
                ..Default::default()
            },
            AccidentUpdate {
                location: Some("x".repeat(5000)),
                ..Default::default()
            },
            AccidentUpdate {
                vehicle_reg: Some("   ".into()),
                ..Default::default()
            },
        ];
        for update in rejected {
            let err = svc
                .update(&officer, accident.id, update.clone())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{update:?}");
        }

        let unchanged = svc.get(&officer, accident.id).await.unwrap();
        assert_eq!(unchanged.latitude, Some(-1.3));
        assert_eq!(unchanged.driver_name, "John Kamau");

        let moved = svc
            .update(
                &officer,
                accident.id,
                AccidentUpdate {
                    vehicle_reg: Some(" kcb 777c ".into()),
                    latitude: Some(-1.25),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.vehicle_reg, "KCB 777C");
        assert_eq!(moved.latitude, Some(-1.25));
    }

    #[tokio::test]
    async fn test_blank_registration_is_rejected_on_create() {
        let svc = AccidentService::new(Arc::new(MemoryAccidentStore::new()));
        let mut blank = input();
        blank.vehicle_reg = "  ".into();
        assert_eq!(
            svc.create(&ctx(UserRole::Police), blank).await.unwrap_err().kind,
            ErrorKind::Validation
        );
    }
}
