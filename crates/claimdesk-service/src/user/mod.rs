//! Identity self-service and administration.

pub mod admin;
pub mod service;

pub use admin::{AdminUserService, RegisterUser};
pub use service::{ChangePassword, UserService};
