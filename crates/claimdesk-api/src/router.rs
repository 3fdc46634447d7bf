//! Route definitions for the ClaimDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use claimdesk_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(accident_routes())
        .merge(claim_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me, register
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/register", post(handlers::auth::register))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me/password", put(handlers::user::change_password))
}

/// Admin identity management
fn admin_routes() -> Router<AppState> {
    use handlers::admin::users;

    Router::new()
        .route("/admin/users", get(users::list_users))
        .route("/admin/users/{id}", get(users::get_user))
        .route("/admin/users/{id}/role", put(users::change_role))
        .route("/admin/users/{id}/deactivate", post(users::deactivate_user))
        .route("/admin/users/{id}/reactivate", post(users::reactivate_user))
}

/// Accident reports
fn accident_routes() -> Router<AppState> {
    use handlers::accident;

    Router::new()
        .route(
            "/accidents",
            get(accident::list_accidents).post(accident::create_accident),
        )
        .route(
            "/accidents/{id}",
            get(accident::get_accident).put(accident::update_accident),
        )
}

/// Insurance claims
fn claim_routes() -> Router<AppState> {
    use handlers::claim;

    Router::new()
        .route(
            "/insurance/claims",
            get(claim::list_claims).post(claim::create_claim),
        )
        .route(
            "/insurance/claims/{id}",
            get(claim::get_claim).put(claim::update_claim),
        )
        .route(
            "/insurance/claims/{id}/status",
            patch(claim::change_claim_status),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn not_found() -> ApiError {
    ApiError(AppError::not_found("Route not found"))
}
