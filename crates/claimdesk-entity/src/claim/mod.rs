//! Insurance claim entities.

pub mod model;
pub mod status;

pub use model::{Claim, ClaimChanges, NewClaim};
pub use status::ClaimStatus;
