//! Insurance claim handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use claimdesk_auth::rbac::policies::{CLAIM_HANDLERS, INSURANCE_AGENT_ONLY};
use claimdesk_entity::claim::Claim;
use claimdesk_service::{ClaimInput, ClaimUpdate};

use crate::dto::request::ChangeClaimStatusRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/insurance/claims
pub async fn list_claims(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Claim>>>, ApiError> {
    require(&auth, &CLAIM_HANDLERS)?;
    let claims = state.claim_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(claims)))
}

/// POST /api/insurance/claims
pub async fn create_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ClaimInput>,
) -> Result<(StatusCode, Json<ApiResponse<Claim>>), ApiError> {
    require(&auth, &INSURANCE_AGENT_ONLY)?;
    let claim = state.claim_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(claim))))
}

/// GET /api/insurance/claims/{id}
pub async fn get_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Claim>>, ApiError> {
    require(&auth, &CLAIM_HANDLERS)?;
    let claim = state.claim_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(claim)))
}

/// PUT /api/insurance/claims/{id}
pub async fn update_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<ClaimUpdate>,
) -> Result<Json<ApiResponse<Claim>>, ApiError> {
    require(&auth, &CLAIM_HANDLERS)?;
    let claim = state.claim_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(claim)))
}

/// PATCH /api/insurance/claims/{id}/status
pub async fn change_claim_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<ChangeClaimStatusRequest>,
) -> Result<Json<ApiResponse<Claim>>, ApiError> {
    require(&auth, &CLAIM_HANDLERS)?;
    let claim = state
        .claim_service
        .change_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(claim)))
}
