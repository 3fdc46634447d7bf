//! Token issuer: login, refresh, logout, and per-request authorization.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use claimdesk_core::error::AppError;
use claimdesk_database::store::IdentityStore;
use claimdesk_entity::user::User;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder, RevocationList, TokenPair};

use super::authenticator::CredentialAuthenticator;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Issued credential pair.
    pub tokens: TokenPair,
    /// The authenticated identity.
    pub user: User,
}

/// A new access token minted from a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedAccess {
    /// The access token.
    pub access_token: String,
    /// Its expiry.
    pub access_expires_at: DateTime<Utc>,
}

/// Issues, refreshes, and revokes stateless tokens.
#[derive(Debug, Clone)]
pub struct SessionManager {
    authenticator: CredentialAuthenticator,
    identities: Arc<dyn IdentityStore>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    revocations: Arc<RevocationList>,
}

impl SessionManager {
    /// Assemble the issuer from its parts.
    pub fn new(
        authenticator: CredentialAuthenticator,
        identities: Arc<dyn IdentityStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationList>,
    ) -> Self {
        Self {
            authenticator,
            identities,
            encoder,
            decoder,
            revocations,
        }
    }

    /// Verify credentials and issue an access + refresh pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self.authenticator.authenticate(email, password).await?;
        let tokens = self.encoder.generate_token_pair(&user)?;
        info!(user_id = %user.id, role = %user.role, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The identity is reloaded and must still exist and be active. The new
    /// token always expires strictly later than the access token issued
    /// alongside the refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self.load_active(&claims).await?;

        let paired_exp = claims.iat + self.encoder.access_ttl().num_seconds();
        let (access_token, access_expires_at) =
            self.encoder.generate_access_token(&user, paired_exp + 1)?;

        debug!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshedAccess {
            access_token,
            access_expires_at,
        })
    }

    /// Revoke the presented access token and, if supplied, a refresh token
    /// belonging to the same identity.
    pub async fn logout(&self, access: &Claims, refresh_token: Option<&str>) -> Result<(), AppError> {
        self.revoke(access).await;

        if let Some(token) = refresh_token {
            match self.decoder.decode_refresh_token(token) {
                Ok(refresh) if refresh.sub == access.sub => self.revoke(&refresh).await,
                Ok(_) => {
                    return Err(AppError::validation(
                        "Refresh token belongs to a different identity",
                    ));
                }
                // Already unusable; nothing to revoke.
                Err(_) => debug!(user_id = %access.sub, "Ignoring invalid refresh token at logout"),
            }
        }

        info!(user_id = %access.sub, "Logout completed");
        Ok(())
    }

    /// Verify an access token and reload its identity.
    ///
    /// A missing or deactivated identity is rejected as an invalid token.
    pub async fn authorize(&self, access_token: &str) -> Result<(Claims, User), AppError> {
        let claims = self.decoder.decode_access_token(access_token)?;
        let user = self.load_active(&claims).await?;
        Ok((claims, user))
    }

    async fn load_active(&self, claims: &Claims) -> Result<User, AppError> {
        match self.identities.find_by_id(claims.sub).await? {
            Some(user) if user.can_login() => Ok(user),
            _ => Err(AppError::invalid_token("Invalid or inactive user")),
        }
    }

    async fn revoke(&self, claims: &Claims) {
        // Keep the entry past `exp` by the leeway the decoder still accepts.
        let ttl = claims.remaining_ttl_seconds() + self.decoder.leeway_seconds();
        self.revocations
            .revoke(claims.jti, Duration::from_secs(ttl))
            .await;
    }
}
