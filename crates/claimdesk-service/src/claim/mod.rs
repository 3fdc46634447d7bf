//! Insurance claim operations.

pub mod service;

pub use service::{ClaimInput, ClaimService, ClaimUpdate};
