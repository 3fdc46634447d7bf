//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered identity: admin, police officer, or insurance agent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, stored lowercase.
    pub email: String,
    /// Argon2id PHC hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Insurance company affiliation, set for insurance agents.
    pub company_id: Option<String>,
    /// Deactivated identities cannot obtain credentials.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if the user can obtain new credentials.
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Normalized (lowercase) email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Company affiliation.
    pub company_id: Option<String>,
}

/// Optional filters for listing users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Only users with this role.
    pub role: Option<UserRole>,
    /// Only users affiliated with this company.
    pub company_id: Option<String>,
}

impl UserFilter {
    /// Whether `user` passes every set filter.
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role == role)
            && self
                .company_id
                .as_deref()
                .is_none_or(|company| user.company_id.as_deref() == Some(company))
    }
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, company: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "a@b.ke".to_string(),
            password_hash: String::new(),
            name: "A".to_string(),
            role,
            company_id: company.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Raise.KE "), "admin@raise.ke");
    }

    #[test]
    fn test_filter_matches() {
        let agent = user(UserRole::InsuranceAgent, Some("INS001"));
        assert!(UserFilter::default().matches(&agent));
        assert!(
            UserFilter {
                role: Some(UserRole::InsuranceAgent),
                company_id: Some("INS001".into()),
            }
            .matches(&agent)
        );
        assert!(
            !UserFilter {
                role: None,
                company_id: Some("INS002".into()),
            }
            .matches(&agent)
        );
        assert!(
            !UserFilter {
                role: Some(UserRole::Police),
                company_id: None,
            }
            .matches(&agent)
        );
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let mut u = user(UserRole::Admin, None);
        u.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_string(&u).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
