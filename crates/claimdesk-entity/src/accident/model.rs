//! Accident report model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AccidentStatus;

/// A traffic accident report filed by a police officer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Accident {
    /// Unique accident identifier.
    pub id: Uuid,
    /// Vehicle registration plate.
    pub vehicle_reg: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Driver's licence number.
    pub driver_license: Option<String>,
    /// Insurer of the vehicle.
    pub insurance_company: String,
    /// Policy number with that insurer.
    pub insurance_policy: Option<String>,
    /// Free-text location.
    pub location: String,
    /// Latitude, if captured.
    pub latitude: Option<f64>,
    /// Longitude, if captured.
    pub longitude: Option<f64>,
    /// When the accident happened.
    pub accident_date: DateTime<Utc>,
    /// Reporting police station.
    pub police_station: String,
    /// Reporting officer.
    pub officer_id: Uuid,
    /// Processing status.
    pub status: AccidentStatus,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to file a new accident report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccident {
    pub vehicle_reg: String,
    pub driver_name: String,
    pub driver_license: Option<String>,
    pub insurance_company: String,
    pub insurance_policy: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accident_date: DateTime<Utc>,
    pub police_station: String,
    /// Filled from the authenticated officer, never from the request body.
    pub officer_id: Uuid,
}

/// Partial update of an accident report. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccidentChanges {
    pub vehicle_reg: Option<String>,
    pub driver_name: Option<String>,
    pub driver_license: Option<String>,
    pub insurance_company: Option<String>,
    pub insurance_policy: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accident_date: Option<DateTime<Utc>>,
    pub police_station: Option<String>,
    pub status: Option<AccidentStatus>,
}

impl Accident {
    /// Apply `changes` in place and bump `updated_at`.
    pub fn apply(&mut self, changes: AccidentChanges) {
        if let Some(v) = changes.vehicle_reg {
            self.vehicle_reg = v;
        }
        if let Some(v) = changes.driver_name {
            self.driver_name = v;
        }
        if changes.driver_license.is_some() {
            self.driver_license = changes.driver_license;
        }
        if let Some(v) = changes.insurance_company {
            self.insurance_company = v;
        }
        if changes.insurance_policy.is_some() {
            self.insurance_policy = changes.insurance_policy;
        }
        if let Some(v) = changes.location {
            self.location = v;
        }
        if changes.latitude.is_some() {
            self.latitude = changes.latitude;
        }
        if changes.longitude.is_some() {
            self.longitude = changes.longitude;
        }
        if let Some(v) = changes.accident_date {
            self.accident_date = v;
        }
        if let Some(v) = changes.police_station {
            self.police_station = v;
        }
        if let Some(v) = changes.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}
