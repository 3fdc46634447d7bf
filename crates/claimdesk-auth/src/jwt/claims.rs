//! JWT claims carried by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimdesk_entity::user::UserRole;

/// Claims payload shared by both token types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity id.
    pub sub: Uuid,
    /// Role at issuance. Authorization uses the freshly loaded role instead.
    pub role: UserRole,
    /// Company affiliation at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Unique token id, the revocation key.
    pub jti: Uuid,
    /// Access or refresh.
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token for API requests.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}

impl Claims {
    /// The identity id.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Seconds until expiry, zero once expired.
    pub fn remaining_ttl_seconds(&self) -> u64 {
        u64::try_from(self.exp - Utc::now().timestamp()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            role: UserRole::Police,
            company_id: None,
            iat: Utc::now().timestamp(),
            exp,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        }
    }

    #[test]
    fn test_remaining_ttl() {
        let now = Utc::now().timestamp();
        assert_eq!(claims(now - 10).remaining_ttl_seconds(), 0);
        let ttl = claims(now + 120).remaining_ttl_seconds();
        assert!((119..=120).contains(&ttl));
    }
}
