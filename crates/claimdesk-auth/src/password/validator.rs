//! Password policy for new passwords.

use claimdesk_core::config::AuthConfig;
use claimdesk_core::error::AppError;

/// Validates password strength against the configured policy.
///
/// Applied on registration and password change only; login never
/// re-checks policy so that older passwords keep working.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: Option<zxcvbn::Score>,
}

impl PasswordValidator {
    /// Create a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let min_score = match config.password_min_score {
            0 => None,
            1 => Some(zxcvbn::Score::One),
            2 => Some(zxcvbn::Score::Two),
            3 => Some(zxcvbn::Score::Three),
            _ => Some(zxcvbn::Score::Four),
        };
        Self {
            min_length: config.password_min_length,
            min_score,
        }
    }

    /// Check `password` against every rule, reporting the first violation.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain at least one special character",
            ));
        }

        if let Some(required) = self.min_score {
            if zxcvbn::zxcvbn(password, &[]).score() < required {
                return Err(AppError::validation(
                    "Password is too easy to guess. Please choose a stronger password.",
                ));
            }
        }

        Ok(())
    }

    /// Reject a new password equal to the current one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}
