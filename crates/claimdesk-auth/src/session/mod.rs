//! Credential checks and the stateless token issuer.

pub mod authenticator;
pub mod manager;

pub use authenticator::CredentialAuthenticator;
pub use manager::{LoginResult, RefreshedAccess, SessionManager};
