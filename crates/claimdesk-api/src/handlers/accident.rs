//! Accident report handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use claimdesk_auth::rbac::policies::{ACCIDENT_EDITORS, ACCIDENT_READERS, POLICE_ONLY};
use claimdesk_entity::accident::Accident;
use claimdesk_service::{AccidentInput, AccidentUpdate};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/accidents
pub async fn list_accidents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Accident>>>, ApiError> {
    require(&auth, &ACCIDENT_READERS)?;
    let accidents = state.accident_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(accidents)))
}

/// POST /api/accidents
pub async fn create_accident(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AccidentInput>,
) -> Result<(StatusCode, Json<ApiResponse<Accident>>), ApiError> {
    require(&auth, &POLICE_ONLY)?;
    let accident = state.accident_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(accident))))
}

/// GET /api/accidents/{id}
pub async fn get_accident(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Accident>>, ApiError> {
    require(&auth, &ACCIDENT_READERS)?;
    let accident = state.accident_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(accident)))
}

/// PUT /api/accidents/{id}
pub async fn update_accident(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<AccidentUpdate>,
) -> Result<Json<ApiResponse<Accident>>, ApiError> {
    require(&auth, &ACCIDENT_EDITORS)?;
    let accident = state.accident_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(accident)))
}
