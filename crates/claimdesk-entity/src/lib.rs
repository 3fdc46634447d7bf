//! # claimdesk-entity
//!
//! Domain entity models for ClaimDesk. Every struct in this crate
//! represents a database table row or the input needed to create or
//! change one. Row types derive `sqlx::FromRow`.

pub mod accident;
pub mod claim;
pub mod user;
