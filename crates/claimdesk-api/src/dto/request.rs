//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use claimdesk_entity::claim::ClaimStatus;
use claimdesk_entity::user::{UserFilter, UserRole};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Optional logout body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke alongside the access token.
    pub refresh_token: Option<String>,
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: UserRole,
}

/// Query string for `GET /api/admin/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    /// Only this role.
    pub role: Option<UserRole>,
    /// Only this company. Blank means no filter.
    pub company_id: Option<String>,
}

impl From<UserListQuery> for UserFilter {
    fn from(q: UserListQuery) -> Self {
        UserFilter {
            role: q.role,
            company_id: q.company_id.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Claim status change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeClaimStatusRequest {
    /// Target status.
    pub status: ClaimStatus,
}
