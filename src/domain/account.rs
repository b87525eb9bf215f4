//! Account domain entity and role handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_BASIC, ROLE_PATIENT, ROLE_SPECIALIST};

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Basic,
    Patient,
    Specialist,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Basic => ROLE_BASIC,
            Role::Patient => ROLE_PATIENT,
            Role::Specialist => ROLE_SPECIALIST,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

/// Unknown values map to the least privileged role.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => Role::Admin,
            ROLE_PATIENT => Role::Patient,
            ROLE_SPECIALIST => Role::Specialist,
            _ => Role::Basic,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability of holding exactly one role that can be replaced wholesale.
///
/// Role demotion during offboarding is written against this trait only, so
/// it does not care how roles end up persisted.
pub trait RoleAssignable {
    /// Current role
    fn role(&self) -> Role;

    /// Replace the role. Returns `false` when the role was already set.
    fn assign_role(&mut self, role: Role) -> bool;
}

/// Account domain entity (login identity).
///
/// Accounts outlive the clinical profiles attached to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new account with the basic role
    pub fn new(id: Uuid, email: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            role: Role::Basic,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl RoleAssignable for Account {
    fn role(&self) -> Role {
        self.role
    }

    fn assign_role(&mut self, role: Role) -> bool {
        if self.role == role {
            return false;
        }
        self.role = role;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_storage_string() {
        for role in [Role::Basic, Role::Patient, Role::Specialist, Role::Admin] {
            let stored: String = role.into();
            assert_eq!(Role::from(stored.as_str()), role);
        }
    }

    #[test]
    fn test_unknown_role_is_basic() {
        assert_eq!(Role::from("superuser"), Role::Basic);
        assert!(!Role::from("").is_admin());
    }

    #[test]
    fn test_assign_role_is_idempotent() {
        let mut account = Account::new(
            Uuid::new_v4(),
            "ana@example.com".to_string(),
            "Ana".to_string(),
        );
        assert!(account.assign_role(Role::Patient));
        assert!(!account.assign_role(Role::Patient));
        assert!(account.assign_role(Role::Basic));
        assert_eq!(account.role(), Role::Basic);
    }
}
