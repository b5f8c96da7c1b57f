use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;

use crate::contract::client::CustomerRolesApi;
use crate::contract::error::RolesError;
use crate::contract::model::RoleCheck;

/// In-process implementation of [`CustomerRolesApi`]: the set of account
/// emails holding the Customer role. Used by hosts running without a roles
/// service (`--mock`) and by tests.
#[derive(Default)]
pub struct LocalRolesDirectory {
    emails: RwLock<HashSet<String>>,
}

impl LocalRolesDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: RwLock::new(emails.into_iter().map(Into::into).collect()),
        }
    }

    pub fn grant(&self, email: impl Into<String>) {
        self.emails.write().insert(email.into());
    }

    pub fn revoke(&self, email: &str) {
        self.emails.write().remove(email);
    }
}

#[async_trait]
impl CustomerRolesApi for LocalRolesDirectory {
    async fn check_user_role(&self, email: &str) -> Result<RoleCheck, RolesError> {
        Ok(RoleCheck {
            exists: self.emails.read().contains(email),
        })
    }
}
