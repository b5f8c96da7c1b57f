use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Permission grant written after a Customer record is first persisted:
/// scopes the linked account's access down to that record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermission {
    /// Record type the grant applies to.
    pub allow: String,
    /// Record name the grant is scoped to.
    pub for_value: String,
    /// Account email the grant is issued for.
    pub user: String,
    pub apply_to_all_doctypes: bool,
}

/// Port onto the host's permission subsystem.
#[async_trait]
pub trait PermissionsPort: Send + Sync {
    async fn create(&self, permission: UserPermission) -> Result<(), DomainError>;
}
