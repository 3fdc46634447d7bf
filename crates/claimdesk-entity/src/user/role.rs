//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// System administrator: manages identities, sees everything.
    Admin,
    /// Police officer: files and updates accident reports.
    Police,
    /// Insurance agent: handles claims for one company.
    #[serde(alias = "insurance_officer")]
    InsuranceAgent,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Police, Self::InsuranceAgent];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Police => "police",
            Self::InsuranceAgent => "insurance_agent",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = claimdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "police" => Ok(Self::Police),
            "insurance_agent" | "insurance_officer" => Ok(Self::InsuranceAgent),
            _ => Err(claimdesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, police, insurance_agent"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("POLICE".parse::<UserRole>().unwrap(), UserRole::Police);
        assert_eq!(
            "insurance_officer".parse::<UserRole>().unwrap(),
            UserRole::InsuranceAgent
        );
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_accepts_legacy_spelling() {
        let role: UserRole = serde_json::from_str("\"insurance_officer\"").unwrap();
        assert_eq!(role, UserRole::InsuranceAgent);
        assert_eq!(
            serde_json::to_string(&role).unwrap(),
            "\"insurance_agent\""
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in UserRole::ALL {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }
}
