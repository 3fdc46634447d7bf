//! Self-service handlers for the signed-in identity.

use axum::Json;
use axum::extract::State;

use claimdesk_service::ChangePassword;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePassword>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.change_password(&auth, req).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password changed"))))
}
