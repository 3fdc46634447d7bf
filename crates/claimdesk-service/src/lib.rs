//! # claimdesk-service
//!
//! Business logic for ClaimDesk. Each service receives its stores and
//! auth components as `Arc`s at construction time and calls the role gate
//! at the top of every operation.

pub mod accident;
pub mod claim;
pub mod context;
pub mod user;
mod validation;

pub use accident::{AccidentInput, AccidentService, AccidentUpdate};
pub use claim::{ClaimInput, ClaimService, ClaimUpdate};
pub use context::RequestContext;
pub use user::{AdminUserService, ChangePassword, RegisterUser, UserService};
