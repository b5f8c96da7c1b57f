use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::error::DomainError;
use crate::domain::ports::{PermissionsPort, UserPermission};

/// In-memory adapter of the host permission subsystem.
#[derive(Default)]
pub struct InMemoryPermissions {
    granted: RwLock<Vec<UserPermission>>,
}

impl InMemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<UserPermission> {
        self.granted.read().clone()
    }
}

#[async_trait]
impl PermissionsPort for InMemoryPermissions {
    async fn create(&self, permission: UserPermission) -> Result<(), DomainError> {
        self.granted.write().push(permission);
        Ok(())
    }
}
