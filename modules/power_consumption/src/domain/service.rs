use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use formkit::Clock;
use tracing::{debug, instrument};

use crate::config::PowerConsumptionConfig;
use crate::contract::model::{PowerConsumptionRecord, RoiCalculation};
use crate::domain::error::DomainError;
use crate::domain::repo::ConsumptionRepository;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One row of the average consumption report.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionReportRow {
    pub customer: String,
    /// Customer display name, when the backend knows one.
    pub full_name: Option<String>,
    pub average_kw: f64,
    pub average_kwh: f64,
}

/// Domain service for consumption readings.
///
/// Date validation is pure against the injected clock; aggregation goes
/// through the [`ConsumptionRepository`] port.
pub struct Service {
    repo: Arc<dyn ConsumptionRepository>,
    clock: Arc<dyn Clock>,
    config: PowerConsumptionConfig,
}

impl Service {
    pub fn new(
        repo: Arc<dyn ConsumptionRepository>,
        clock: Arc<dyn Clock>,
        config: PowerConsumptionConfig,
    ) -> Self {
        Self { repo, clock, config }
    }

    /// Rejects readings dated strictly after the current moment. A reading
    /// dated exactly now, or carrying no date at all, is accepted.
    pub fn validate_reading_date(
        &self,
        date: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        match date {
            Some(d) if d > self.clock.now() => Err(DomainError::FutureDate),
            _ => Ok(()),
        }
    }

    /// Recomputes the ROI aggregate for the month the reading falls into.
    ///
    /// All dated readings of the customer inside that calendar month feed
    /// the averages. Night-hour readings (23:00 to 05:59) form the low
    /// tariff bucket, the rest the high one; each tariff is its bucket's
    /// average kWh times the configured rate, zero for an empty bucket.
    /// The aggregate name is assigned once and survives recomputation.
    #[instrument(
        name = "power_consumption.recompute_month",
        skip(self, record),
        fields(customer = %record.customer)
    )]
    pub async fn recompute_month(
        &self,
        record: &PowerConsumptionRecord,
    ) -> anyhow::Result<Option<RoiCalculation>> {
        let Some(date) = record.date else {
            debug!("reading carries no date, skipping aggregation");
            return Ok(None);
        };

        let (start, end) = month_window(date)?;
        let readings = self
            .repo
            .consumption_in_range(Some(&record.customer), Some(start), Some(end))
            .await?;
        if readings.is_empty() {
            return Ok(None);
        }

        let count = readings.len() as f64;
        let average_kw = readings.iter().map(|r| r.kw).sum::<f64>() / count;
        let average_kwh = readings.iter().map(|r| r.kwh).sum::<f64>() / count;

        let mut low = Vec::new();
        let mut high = Vec::new();
        for reading in &readings {
            let Some(d) = reading.date else { continue };
            if is_low_tariff_hour(d.hour()) {
                low.push(reading.kwh);
            } else {
                high.push(reading.kwh);
            }
        }
        let low_tariff = self.config.low_tariff_rate * mean(&low);
        let high_tariff = self.config.high_tariff_rate * mean(&high);

        let (month, year) = (date.month(), date.year());
        let name = match self.repo.find_roi(&record.customer, month, year).await? {
            Some(existing) => existing.name,
            None => {
                let seq = self.repo.roi_count_for_customer(&record.customer).await? + 1;
                roi_name(&record.customer, month, year, seq)?
            }
        };

        let roi = RoiCalculation {
            name,
            customer: record.customer.clone(),
            month,
            year,
            average_kw,
            average_kwh,
            low_tariff,
            high_tariff,
        };
        self.repo.upsert_roi(roi.clone()).await?;
        debug!(name = %roi.name, readings = readings.len(), "roi aggregate stored");
        Ok(Some(roi))
    }

    /// Average consumption per customer over `[from, to)`, one row per
    /// customer that has at least one dated reading in the window.
    pub async fn average_consumption_report(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<ConsumptionReportRow>> {
        let readings = self.repo.consumption_in_range(None, from, to).await?;

        let mut buckets: BTreeMap<String, Vec<&PowerConsumptionRecord>> = BTreeMap::new();
        for reading in &readings {
            buckets.entry(reading.customer.clone()).or_default().push(reading);
        }

        let mut rows = Vec::with_capacity(buckets.len());
        for (customer, group) in buckets {
            let count = group.len() as f64;
            let full_name = self.repo.customer_full_name(&customer).await?;
            rows.push(ConsumptionReportRow {
                average_kw: group.iter().map(|r| r.kw).sum::<f64>() / count,
                average_kwh: group.iter().map(|r| r.kwh).sum::<f64>() / count,
                customer,
                full_name,
            });
        }
        Ok(rows)
    }
}

/// Half-open window covering the calendar month of `date`.
fn month_window(date: DateTime<Utc>) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc
        .with_ymd_and_hms(date.year(), date.month(), 1, 0, 0, 0)
        .single()
        .context("month start out of range")?;
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .context("month end out of range")?;
    Ok((start, end))
}

fn is_low_tariff_hour(hour: u32) -> bool {
    hour >= 23 || hour < 6
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn roi_name(customer: &str, month: u32, year: i32, seq: usize) -> anyhow::Result<String> {
    let month_name = MONTH_NAMES
        .get(month as usize - 1)
        .context("month out of range")?;
    Ok(format!("{customer}--{month_name}--{year}-{seq}"))
}
