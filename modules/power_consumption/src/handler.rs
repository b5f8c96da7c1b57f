use std::sync::Arc;

use async_trait::async_trait;
use formkit::{FormError, FormHandler, FormState};
use tracing::warn;

use crate::contract::model::PowerConsumptionRecord;
use crate::domain::service::Service;

/// Form hooks for the power consumption record.
pub struct PowerConsumptionFormHandler {
    service: Arc<Service>,
}

impl PowerConsumptionFormHandler {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FormHandler<PowerConsumptionRecord> for PowerConsumptionFormHandler {
    async fn on_refresh(
        &self,
        _form: &mut FormState<PowerConsumptionRecord>,
    ) -> Result<(), FormError> {
        // Reserved extension point.
        Ok(())
    }

    async fn on_validate(
        &self,
        form: &mut FormState<PowerConsumptionRecord>,
    ) -> Result<(), FormError> {
        self.service
            .validate_reading_date(form.record().date)
            .map_err(Into::into)
    }

    async fn on_after_insert(
        &self,
        form: &mut FormState<PowerConsumptionRecord>,
    ) -> Result<(), FormError> {
        // Aggregation failure must not undo an already persisted reading.
        if let Err(e) = self.service.recompute_month(form.record()).await {
            warn!(error = %e, record = %form.meta().name, "roi recomputation failed");
        }
        Ok(())
    }
}
