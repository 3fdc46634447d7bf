//! Bearer-token extractors.
//!
//! [`AuthUser`] verifies an access token and reloads the identity behind it,
//! and [`AdminUser`] additionally requires the admin role. [`RefreshBearer`] only lifts the raw token so the refresh handler can
//! hand it to the issuer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use claimdesk_auth::jwt::Claims;
use claimdesk_core::error::AppError;
use claimdesk_service::context::RequestContext;

use crate::error::ApiError;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Current identity, as reloaded for this request.
    pub context: RequestContext,
    /// Claims of the presented access token.
    pub claims: Claims,
}

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;
        let (claims, user) = state.session_manager.authorize(&token).await?;

        Ok(AuthUser {
            context: RequestContext::from_user(&user),
            claims,
        })
    }
}

/// An [`AuthUser`] that holds the admin role.
///
/// Rejects before any body extractor runs, so non-admins get 403 whatever
/// they send.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0.context
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        require_admin(&auth)?;
        Ok(AdminUser(auth))
    }
}

/// Raw bearer token presented to the refresh endpoint.
#[derive(Debug, Clone)]
pub struct RefreshBearer(pub String);

impl FromRequestParts<AppState> for RefreshBearer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts, state).await.map(RefreshBearer)
    }
}

async fn bearer_token(parts: &mut Parts, state: &AppState) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_token("Missing or malformed Authorization header"))?;
    Ok(bearer.token().to_string())
}
