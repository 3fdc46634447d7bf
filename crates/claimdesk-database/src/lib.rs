//! # claimdesk-database
//!
//! Persistence for identities, accident reports and claims: the store
//! traits the services depend on, their PostgreSQL implementations, and
//! dashmap-backed in-memory implementations for tests and dev runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{AccidentStore, ClaimStore, IdentityStore, Stores};
