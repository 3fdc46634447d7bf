//! In-memory store implementations backed by `dashmap`.
//!
//! Used by the integration tests and by `claimdesk serve --in-memory`.
//! Data lives for the lifetime of the process.

mod accident;
mod claim;
mod identity;

pub use accident::MemoryAccidentStore;
pub use claim::MemoryClaimStore;
pub use identity::MemoryIdentityStore;
