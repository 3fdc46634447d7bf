//! Token verification: signature, expiry, type, and revocation.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use claimdesk_core::config::AuthConfig;
use claimdesk_core::error::AppError;

use super::claims::{Claims, TokenType};
use super::revocation::RevocationList;

/// Validates tokens and consults the revocation list.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<RevocationList>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Build a decoder from auth configuration.
    pub fn new(config: &AuthConfig, revocations: Arc<RevocationList>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Clock skew accepted past `exp`, in seconds.
    pub fn leeway_seconds(&self) -> u64 {
        self.validation.leeway
    }

    /// Verify an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Verify a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::invalid_token("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                _ => AppError::invalid_token("Invalid token"),
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::invalid_token(format!(
                "Invalid token type: expected {expected:?} token"
            )));
        }

        if self.revocations.is_revoked(&claims.jti) {
            return Err(AppError::invalid_token("Token has been revoked"));
        }

        Ok(claims)
    }
}
