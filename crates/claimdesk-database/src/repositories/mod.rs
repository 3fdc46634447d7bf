//! PostgreSQL implementations of the store traits.

pub mod accident;
pub mod claim;
pub mod user;

pub use accident::AccidentRepository;
pub use claim::ClaimRepository;
pub use user::UserRepository;

use claimdesk_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into `Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, conflict: &str, context: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::conflict(conflict);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
