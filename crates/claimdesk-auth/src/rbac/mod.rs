//! Role gate: static allow-lists and the company-affiliation check.

pub mod enforcer;
pub mod policies;

pub use enforcer::{Principal, require_company_access, require_role};
pub use policies::RoleSet;
