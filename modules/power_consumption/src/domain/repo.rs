use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::model::{PowerConsumptionRecord, RoiCalculation};

/// Persistence port for consumption readings and ROI aggregates.
///
/// The host wires a concrete backend into the client hub; the domain service
/// only ever talks to this trait.
#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    /// Dated readings with `from <= date < to`, optionally scoped to one
    /// customer. `None` bounds are open. Undated readings never match.
    async fn consumption_in_range(
        &self,
        customer: Option<&str>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<PowerConsumptionRecord>>;

    /// The ROI aggregate for one customer month, if it exists.
    async fn find_roi(
        &self,
        customer: &str,
        month: u32,
        year: i32,
    ) -> anyhow::Result<Option<RoiCalculation>>;

    /// Insert or replace an aggregate, keyed by its `name`.
    async fn upsert_roi(&self, roi: RoiCalculation) -> anyhow::Result<()>;

    /// Number of ROI aggregates already stored for a customer. Used to pick
    /// the sequence suffix of a new aggregate name.
    async fn roi_count_for_customer(&self, customer: &str) -> anyhow::Result<usize>;

    /// Display name of a customer, joined into report rows.
    async fn customer_full_name(&self, customer: &str) -> anyhow::Result<Option<String>>;
}
