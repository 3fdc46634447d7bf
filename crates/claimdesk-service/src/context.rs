//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimdesk_auth::rbac::Principal;
use claimdesk_entity::user::{User, UserRole};

/// Who is acting on the current request.
///
/// Built from the identity reloaded for the request, so the role and
/// company are current rather than whatever the token carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identity id.
    pub user_id: Uuid,
    /// Identity email.
    pub email: String,
    /// Current role.
    pub role: UserRole,
    /// Current company affiliation.
    pub company_id: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for `user`, stamped now.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            company_id: user.company_id.clone(),
            request_time: Utc::now(),
        }
    }

    /// Whether the actor is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl Principal for RequestContext {
    fn role(&self) -> UserRole {
        self.role
    }

    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}
