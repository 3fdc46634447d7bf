//! # claimdesk-api
//!
//! HTTP API layer for ClaimDesk built on Axum: router, middleware,
//! handlers, extractors, and request/response DTOs.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, init_tracing, serve};
pub use error::ApiError;
pub use state::AppState;
