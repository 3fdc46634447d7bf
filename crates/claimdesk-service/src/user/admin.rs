//! Admin identity management: registration, activation, and role changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use claimdesk_auth::password::{PasswordHasher, PasswordValidator};
use claimdesk_auth::rbac::policies::ADMIN_ONLY;
use claimdesk_auth::rbac::require_role;
use claimdesk_core::error::AppError;
use claimdesk_database::store::IdentityStore;
use claimdesk_entity::user::{CreateUser, User, UserFilter, UserRole, normalize_email};

use crate::context::RequestContext;
use crate::validation::check;

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUser {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password, checked against the password policy.
    pub password: String,
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Company affiliation; required for insurance agents.
    #[validate(length(min = 1, max = 50, message = "Company id must be 1-50 characters"))]
    pub company_id: Option<String>,
}

/// Handles administrative identity operations. Every method is admin-only.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl AdminUserService {
    /// Creates a new admin user service.
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

    /// Register a new identity.
    pub async fn register(&self, ctx: &RequestContext, req: RegisterUser) -> Result<User, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        let user = self.create(req).await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            role = %user.role,
            "User registered by admin"
        );
        Ok(user)
    }

    /// Create an identity without an acting admin. Used by the CLI and seeding.
    pub async fn create(&self, mut req: RegisterUser) -> Result<User, AppError> {
        req.email = normalize_email(&req.email);
        req.name = req.name.trim().to_string();
        req.company_id = req
            .company_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        check(&req)?;
        self.validator.validate(&req.password)?;
        if req.role == UserRole::InsuranceAgent && req.company_id.is_none() {
            return Err(AppError::validation(
                "company_id is required for insurance agents",
            ));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        self.identities
            .create(&CreateUser {
                email: req.email,
                password_hash,
                name: req.name,
                role: req.role,
                company_id: req.company_id,
            })
            .await
    }

    /// List identities, optionally filtered by role and company.
    pub async fn list(&self, ctx: &RequestContext, filter: UserFilter) -> Result<Vec<User>, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        self.identities.list(&filter).await
    }

    /// Fetch one identity.
    pub async fn get(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        self.find(user_id).await
    }

    /// Deactivate an identity. Its existing tokens stop working on the next request.
    pub async fn deactivate(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        if user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot deactivate your own account"));
        }
        let user = self.identities.set_active(user_id, false).await?;
        info!(admin_id = %ctx.user_id, target_id = %user_id, "User deactivated");
        Ok(user)
    }

    /// Reactivate an identity.
    pub async fn reactivate(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        let user = self.identities.set_active(user_id, true).await?;
        info!(admin_id = %ctx.user_id, target_id = %user_id, "User reactivated");
        Ok(user)
    }

    /// Change an identity's role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        require_role(ctx, &ADMIN_ONLY)?;
        if user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot change your own role"));
        }

        let current = self.find(user_id).await?;
        if role == UserRole::InsuranceAgent && current.company_id.is_none() {
            return Err(AppError::validation(
                "User has no company affiliation and cannot become an insurance agent",
            ));
        }

        let user = self.identities.update_role(user_id, role).await?;
        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            old_role = %current.role,
            new_role = %role,
            "User role changed"
        );
        Ok(user)
    }

    async fn find(&self, user_id: Uuid) -> Result<User, AppError> {
        self.identities
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
