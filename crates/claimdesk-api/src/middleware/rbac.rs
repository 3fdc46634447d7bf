//! Role guards called at the top of handlers.

use claimdesk_auth::rbac::{RoleSet, require_role};
use claimdesk_auth::rbac::policies::ADMIN_ONLY;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Checks that the authenticated identity holds one of `allowed`.
pub fn require(auth: &AuthUser, allowed: &RoleSet) -> Result<(), ApiError> {
    require_role(auth.context(), allowed).map_err(ApiError)
}

/// Checks that the authenticated identity is an admin.
pub fn require_admin(auth: &AuthUser) -> Result<(), ApiError> {
    require(auth, &ADMIN_ONLY)
}
