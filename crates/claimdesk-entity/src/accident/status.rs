//! Accident report status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing status of an accident report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "accident_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccidentStatus {
    /// Filed, not yet reviewed.
    #[default]
    Pending,
    /// Details confirmed by a reviewer.
    Verified,
    /// Marked for follow-up.
    Flagged,
    /// Closed.
    Resolved,
    /// Linked claims are being processed.
    ClaimsProcessing,
}

impl AccidentStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Flagged => "flagged",
            Self::Resolved => "resolved",
            Self::ClaimsProcessing => "claims_processing",
        }
    }
}

impl fmt::Display for AccidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccidentStatus {
    type Err = claimdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "flagged" => Ok(Self::Flagged),
            "resolved" => Ok(Self::Resolved),
            "claims_processing" => Ok(Self::ClaimsProcessing),
            _ => Err(claimdesk_core::AppError::validation(format!(
                "Invalid accident status: '{s}'"
            ))),
        }
    }
}
