use std::sync::Arc;

use formkit::{Indicator, LinkQuery, Notification, Notifier};
use tracing::{debug, instrument, warn};

use crate::contract::client::{CustomerRolesApi, CUSTOMER_ROLE};
use crate::contract::model::{CustomerRecord, RoleCheck};
use crate::domain::error::DomainError;
use crate::domain::ports::{PermissionsPort, UserPermission};

/// Title of the non-blocking notification shown when the role check itself
/// could not complete.
pub const PERMISSION_DENIED_TITLE: &str = "Permission Denied";

/// Customer business rules. Depends only on the roles client, the
/// permissions port and the notifier - no infra types.
pub struct Service {
    roles: Arc<dyn CustomerRolesApi>,
    permissions: Arc<dyn PermissionsPort>,
    notifier: Arc<dyn Notifier>,
}

impl Service {
    pub fn new(
        roles: Arc<dyn CustomerRolesApi>,
        permissions: Arc<dyn PermissionsPort>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            roles,
            permissions,
            notifier,
        }
    }

    /// Role-check validation.
    ///
    /// A missing email is a valid skip-condition, not an error. An account
    /// without the Customer role is a business-rule rejection and blocks
    /// the save. A failed remote call is reported via a red notification
    /// and deliberately does NOT block: the check neither confirmed nor
    /// denied eligibility, and the original behavior lets such a save
    /// complete.
    #[instrument(
        name = "customer.service.validate_linked_user",
        skip(self, email),
        fields(has_email = email.is_some())
    )]
    pub async fn validate_linked_user(&self, email: Option<&str>) -> Result<(), DomainError> {
        let Some(email) = email.filter(|e| !e.is_empty()) else {
            debug!("no email set; skipping role check");
            return Ok(());
        };

        match self.roles.check_user_role(email).await {
            Ok(RoleCheck { exists: true }) => {
                debug!("linked account holds the Customer role");
                Ok(())
            }
            Ok(RoleCheck { exists: false }) => Err(DomainError::IneligibleUser),
            Err(e) => {
                warn!(error = %e, "role check call failed; save not blocked");
                self.notifier.notify(Notification::new(
                    PERMISSION_DENIED_TITLE,
                    e.to_string(),
                    Indicator::Red,
                ));
                Ok(())
            }
        }
    }

    /// Display name derivation: `first_name`, or `first_name last_name`
    /// when a non-empty last name is present.
    pub fn derive_full_name(record: &CustomerRecord) -> String {
        match record.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last) => format!("{} {}", record.first_name, last),
            None => record.first_name.clone(),
        }
    }

    /// Candidate query for the `user` picker, obtained from the typed
    /// client. Client-side filtering only; the authoritative check stays in
    /// [`Self::validate_linked_user`].
    pub fn user_picker_query(&self) -> LinkQuery {
        self.roles.customer_users_query()
    }

    /// Scope the linked account's access down to the freshly inserted
    /// record.
    #[instrument(
        name = "customer.service.grant_customer_permission",
        skip(self),
        fields(record = record_name)
    )]
    pub async fn grant_customer_permission(
        &self,
        record_name: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        self.permissions
            .create(UserPermission {
                allow: CUSTOMER_ROLE.to_string(),
                for_value: record_name.to_string(),
                user: email.to_string(),
                apply_to_all_doctypes: true,
            })
            .await
    }
}
