//! Authentication handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use claimdesk_core::error::AppError;
use claimdesk_service::RegisterUser;

use crate::dto::request::{LoginRequest, LogoutRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, RefreshResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser, JsonBody, RefreshBearer, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state.session_manager.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(LoginResponse::from(result))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    RefreshBearer(token): RefreshBearer,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let refreshed = state.session_manager.refresh(&token).await?;
    Ok(Json(ApiResponse::ok(RefreshResponse::from(refreshed))))
}

/// POST /api/auth/logout
///
/// The body is optional; when present it may name a refresh token to
/// revoke together with the access token.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let req: LogoutRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LogoutRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid logout body: {e}")))?
    };

    state
        .session_manager
        .logout(&auth.claims, req.refresh_token.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Logged out"))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// POST /api/auth/register
///
/// The body is normalized and validated by the service.
pub async fn register(
    State(state): State<AppState>,
    admin: AdminUser,
    JsonBody(req): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.admin_user_service.register(&admin, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}
