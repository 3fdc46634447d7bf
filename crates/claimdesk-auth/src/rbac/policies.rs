//! Statically declared role allow-lists.

use std::fmt;

use claimdesk_entity::user::UserRole;

/// A named, fixed set of roles permitted to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet {
    name: &'static str,
    roles: &'static [UserRole],
}

impl RoleSet {
    /// Declare a role set.
    pub const fn new(name: &'static str, roles: &'static [UserRole]) -> Self {
        Self { name, roles }
    }

    /// Whether `role` is a member.
    pub fn contains(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// The member roles.
    pub fn roles(&self) -> &'static [UserRole] {
        self.roles
    }

    /// Set name, used in log and error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity administration.
pub const ADMIN_ONLY: RoleSet = RoleSet::new("admin_only", &[UserRole::Admin]);

/// Filing accident reports.
pub const POLICE_ONLY: RoleSet = RoleSet::new("police_only", &[UserRole::Police]);

/// Lodging claims.
pub const INSURANCE_AGENT_ONLY: RoleSet =
    RoleSet::new("insurance_agent_only", &[UserRole::InsuranceAgent]);

/// Any authenticated identity.
pub const ALL_ROLES: RoleSet = RoleSet::new("all_roles", &UserRole::ALL);

/// Viewing accident reports.
pub const ACCIDENT_READERS: RoleSet = RoleSet::new(
    "accident_readers",
    &[UserRole::Admin, UserRole::InsuranceAgent, UserRole::Police],
);

/// Amending accident reports.
pub const ACCIDENT_EDITORS: RoleSet =
    RoleSet::new("accident_editors", &[UserRole::Admin, UserRole::Police]);

/// Viewing and amending claims; combined with the company gate.
pub const CLAIM_HANDLERS: RoleSet = RoleSet::new(
    "claim_handlers",
    &[UserRole::Admin, UserRole::InsuranceAgent],
);
