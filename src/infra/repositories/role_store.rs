//! Role assignment contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Role;
use crate::errors::AppResult;

/// Outcome of a role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleUpdate {
    /// No active account with that id
    Unresolved,
    /// Account already held the role
    Unchanged,
    Changed,
}

/// Persistent role assignment.
///
/// Idempotent: assigning the role an account already holds writes nothing.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn set_role(&self, account_id: Uuid, role: Role) -> AppResult<RoleUpdate>;
}
