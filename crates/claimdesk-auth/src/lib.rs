//! # claimdesk-auth
//!
//! Authentication and authorization for ClaimDesk.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and password policy
//! - `jwt`: token claims, signing, verification, and the revocation list
//! - `session`: credential authenticator and the token issuer built on it
//! - `rbac`: static role allow-lists and the company gate

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, RevocationList, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Principal, RoleSet, require_company_access, require_role};
pub use session::{CredentialAuthenticator, LoginResult, RefreshedAccess, SessionManager};
