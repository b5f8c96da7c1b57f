use std::sync::Arc;

use async_trait::async_trait;
use formkit::{FormError, FormHandler, FormState};
use tracing::warn;

use crate::contract::model::CustomerRecord;
use crate::domain::service::Service;

/// Form field names of the Customer doctype this handler reacts to.
pub const EMAIL_FIELD: &str = "email";
pub const USER_FIELD: &str = "user";

/// Lifecycle handler for Customer forms.
pub struct CustomerFormHandler {
    service: Arc<Service>,
}

impl CustomerFormHandler {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FormHandler<CustomerRecord> for CustomerFormHandler {
    async fn on_setup(&self, form: &mut FormState<CustomerRecord>) -> Result<(), FormError> {
        form.set_link_query(USER_FIELD, self.service.user_picker_query());
        Ok(())
    }

    // Reserved extension point: refresh currently needs no UI work.
    async fn on_refresh(&self, _form: &mut FormState<CustomerRecord>) -> Result<(), FormError> {
        Ok(())
    }

    async fn on_validate(&self, form: &mut FormState<CustomerRecord>) -> Result<(), FormError> {
        self.service
            .validate_linked_user(form.record().email.as_deref())
            .await
            .map_err(Into::into)
    }

    async fn on_before_save(&self, form: &mut FormState<CustomerRecord>) -> Result<(), FormError> {
        let full_name = Service::derive_full_name(form.record());
        form.record_mut().full_name = full_name;
        Ok(())
    }

    async fn on_field_changed(
        &self,
        form: &mut FormState<CustomerRecord>,
        field: &str,
    ) -> Result<(), FormError> {
        // Revalidate immediately on email edits rather than waiting for the
        // next save.
        if field == EMAIL_FIELD {
            self.service
                .validate_linked_user(form.record().email.as_deref())
                .await
                .map_err(Into::<FormError>::into)?;
        }
        Ok(())
    }

    async fn on_after_insert(&self, form: &mut FormState<CustomerRecord>) -> Result<(), FormError> {
        let Some(email) = form
            .record()
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(str::to_string)
        else {
            return Ok(());
        };

        // The record is already persisted; a failed grant is logged, never
        // blocking.
        if let Err(e) = self
            .service
            .grant_customer_permission(&form.meta().name, &email)
            .await
        {
            warn!(error = %e, record = %form.meta().name, "user permission grant failed");
        }
        Ok(())
    }
}
