//! Route handlers, one module per resource.

pub mod accident;
pub mod admin;
pub mod auth;
pub mod claim;
pub mod health;
pub mod user;
