use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formkit::{RecordStore, StoreError};
use parking_lot::RwLock;

use crate::contract::model::{PowerConsumptionRecord, RoiCalculation};
use crate::domain::repo::ConsumptionRepository;

/// In-memory backend serving both the form store and the repository port,
/// so a reading saved through a form session is immediately visible to
/// ROI aggregation.
#[derive(Default)]
pub struct InMemoryConsumptionStore {
    readings: RwLock<HashMap<String, PowerConsumptionRecord>>,
    roi: RwLock<HashMap<String, RoiCalculation>>,
    customer_names: RwLock<HashMap<String, String>>,
}

impl InMemoryConsumptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer display name for report joins.
    pub fn set_customer_full_name(&self, customer: impl Into<String>, full_name: impl Into<String>) {
        self.customer_names
            .write()
            .insert(customer.into(), full_name.into());
    }

    /// Every stored ROI aggregate, in no particular order.
    pub fn roi_rows(&self) -> Vec<RoiCalculation> {
        self.roi.read().values().cloned().collect()
    }
}

#[async_trait]
impl RecordStore<PowerConsumptionRecord> for InMemoryConsumptionStore {
    async fn load(&self, name: &str) -> Result<Option<PowerConsumptionRecord>, StoreError> {
        Ok(self.readings.read().get(name).cloned())
    }

    async fn save(&self, name: &str, record: PowerConsumptionRecord) -> Result<(), StoreError> {
        self.readings.write().insert(name.to_owned(), record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<(String, PowerConsumptionRecord)>, StoreError> {
        Ok(self
            .readings
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[async_trait]
impl ConsumptionRepository for InMemoryConsumptionStore {
    async fn consumption_in_range(
        &self,
        customer: Option<&str>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<PowerConsumptionRecord>> {
        let readings = self.readings.read();
        let mut matched: Vec<_> = readings
            .values()
            .filter(|r| customer.is_none_or(|c| r.customer == c))
            .filter(|r| match r.date {
                Some(d) => from.is_none_or(|f| d >= f) && to.is_none_or(|t| d < t),
                None => false,
            })
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.date);
        Ok(matched)
    }

    async fn find_roi(
        &self,
        customer: &str,
        month: u32,
        year: i32,
    ) -> anyhow::Result<Option<RoiCalculation>> {
        Ok(self
            .roi
            .read()
            .values()
            .find(|r| r.customer == customer && r.month == month && r.year == year)
            .cloned())
    }

    async fn upsert_roi(&self, roi: RoiCalculation) -> anyhow::Result<()> {
        self.roi.write().insert(roi.name.clone(), roi);
        Ok(())
    }

    async fn roi_count_for_customer(&self, customer: &str) -> anyhow::Result<usize> {
        Ok(self
            .roi
            .read()
            .values()
            .filter(|r| r.customer == customer)
            .count())
    }

    async fn customer_full_name(&self, customer: &str) -> anyhow::Result<Option<String>> {
        Ok(self.customer_names.read().get(customer).cloned())
    }
}
