//! Guard functions called at the top of each protected operation.

use tracing::debug;

use claimdesk_core::error::AppError;
use claimdesk_entity::user::{User, UserRole};

use super::policies::RoleSet;

/// Anything carrying a role and an optional company affiliation.
pub trait Principal {
    /// Current role.
    fn role(&self) -> UserRole;

    /// Company affiliation, if any.
    fn company_id(&self) -> Option<&str>;
}

impl Principal for User {
    fn role(&self) -> UserRole {
        self.role
    }

    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}

/// Pass if the principal's role is in `allowed`, else `Forbidden`.
pub fn require_role<P: Principal + ?Sized>(principal: &P, allowed: &RoleSet) -> Result<(), AppError> {
    let role = principal.role();
    if allowed.contains(role) {
        return Ok(());
    }
    debug!(role = %role, required = %allowed, "Role gate denied");
    Err(AppError::forbidden("Insufficient permissions"))
}

/// Gate access to a resource owned by `resource_company`.
///
/// Admins pass unconditionally. Insurance agents pass only when affiliated
/// with that same company. Everyone else is `Forbidden`.
pub fn require_company_access<P: Principal + ?Sized>(
    principal: &P,
    resource_company: &str,
) -> Result<(), AppError> {
    match principal.role() {
        UserRole::Admin => Ok(()),
        UserRole::InsuranceAgent => match principal.company_id() {
            Some(company) if company == resource_company => Ok(()),
            Some(_) => Err(AppError::forbidden(
                "Access denied: resource belongs to another company",
            )),
            None => Err(AppError::forbidden(
                "Access denied: no company affiliation",
            )),
        },
        UserRole::Police => Err(AppError::forbidden("Insufficient permissions")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::policies::{
        ACCIDENT_EDITORS, ACCIDENT_READERS, ADMIN_ONLY, ALL_ROLES, CLAIM_HANDLERS,
        INSURANCE_AGENT_ONLY, POLICE_ONLY,
    };
    use claimdesk_core::ErrorKind;

    struct Who(UserRole, Option<&'static str>);

    impl Principal for Who {
        fn role(&self) -> UserRole {
            self.0
        }

        fn company_id(&self) -> Option<&str> {
            self.1
        }
    }

    #[test]
    fn test_gate_matches_membership_for_every_role_and_set() {
        let sets = [
            ADMIN_ONLY,
            POLICE_ONLY,
            INSURANCE_AGENT_ONLY,
            ALL_ROLES,
            ACCIDENT_READERS,
            ACCIDENT_EDITORS,
            CLAIM_HANDLERS,
        ];
        for set in sets {
            for role in UserRole::ALL {
                let result = require_role(&Who(role, None), &set);
                if set.contains(role) {
                    assert!(result.is_ok(), "{role} should pass {set}");
                } else {
                    assert_eq!(result.unwrap_err().kind, ErrorKind::Forbidden);
                }
            }
        }
    }

    #[test]
    fn test_company_gate() {
        assert!(require_company_access(&Who(UserRole::Admin, None), "INS001").is_ok());
        assert!(
            require_company_access(&Who(UserRole::InsuranceAgent, Some("INS001")), "INS001").is_ok()
        );
        assert!(
            require_company_access(&Who(UserRole::InsuranceAgent, Some("INS002")), "INS001")
                .is_err()
        );
        assert!(require_company_access(&Who(UserRole::InsuranceAgent, None), "INS001").is_err());
        assert!(require_company_access(&Who(UserRole::Police, Some("INS001")), "INS001").is_err());
    }
}
