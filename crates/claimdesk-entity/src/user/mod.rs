//! User (identity) domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User, UserFilter, normalize_email};
pub use role::UserRole;
