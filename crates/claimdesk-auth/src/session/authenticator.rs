//! Email + password verification.

use std::sync::Arc;

use tracing::{info, warn};

use claimdesk_core::error::AppError;
use claimdesk_database::store::IdentityStore;
use claimdesk_entity::user::{User, normalize_email};

use crate::password::PasswordHasher;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Verifies credentials against stored Argon2id hashes.
#[derive(Debug, Clone)]
pub struct CredentialAuthenticator {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<PasswordHasher>,
}

impl CredentialAuthenticator {
    /// Create an authenticator over `identities`.
    pub fn new(identities: Arc<dyn IdentityStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { identities, hasher }
    }

    /// Check `email` and `password`.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    /// A correct password on a deactivated identity yields `AccountInactive`.
    /// On success `last_login_at` is stamped; failure to do so is only logged.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let Some(mut user) = self.identities.find_by_email(&email).await? else {
            self.hasher.verify_dummy(password);
            info!("Login rejected: unknown email");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        if !user.can_login() {
            info!(user_id = %user.id, "Login rejected: account inactive");
            return Err(AppError::account_inactive("Account is deactivated"));
        }

        match self.identities.update_last_login(user.id).await {
            Ok(()) => user.last_login_at = Some(chrono::Utc::now()),
            Err(e) => warn!(user_id = %user.id, error = %e, "Failed to record last login"),
        }

        Ok(user)
    }
}
