//! Self-service operations for the signed-in identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use claimdesk_auth::password::{PasswordHasher, PasswordValidator};
use claimdesk_core::error::AppError;
use claimdesk_database::store::IdentityStore;
use claimdesk_entity::user::User;

use crate::context::RequestContext;
use crate::validation::check;

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePassword {
    /// The password currently in use.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// The replacement.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Profile and password operations on one's own identity.
#[derive(Debug, Clone)]
pub struct UserService {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            identities,
            hasher,
            validator,
        }
    }

    /// Load the caller's identity.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.identities
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change the caller's password after checking the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        req: ChangePassword,
    ) -> Result<(), AppError> {
        check(&req)?;
        self.validator.validate(&req.new_password)?;
        self.validator
            .validate_not_same(&req.current_password, &req.new_password)?;

        let user = self.get_profile(ctx).await?;
        if !self
            .hasher
            .verify_password(&req.current_password, &user.password_hash)?
        {
            return Err(AppError::invalid_credentials("Current password is incorrect"));
        }

        let hash = self.hasher.hash_password(&req.new_password)?;
        self.identities.update_password(ctx.user_id, &hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}
