use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single power consumption reading for a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerConsumptionRecord {
    /// Customer record name this reading belongs to.
    #[serde(default)]
    pub customer: String,

    /// Moment the reading was taken. A reading without a date is accepted
    /// but never participates in range queries or ROI aggregation.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// Instantaneous load, kilowatt.
    #[serde(default)]
    pub kw: f64,

    /// Consumed energy, kilowatt-hour.
    #[serde(default)]
    pub kwh: f64,
}

/// Monthly ROI aggregate for one customer, recomputed every time a reading
/// lands in that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiCalculation {
    /// Stable record name, assigned on first insert and kept on updates.
    pub name: String,
    pub customer: String,
    /// Calendar month, 1 to 12.
    pub month: u32,
    pub year: i32,
    pub average_kw: f64,
    pub average_kwh: f64,
    /// Estimated cost of night-hour consumption.
    pub low_tariff: f64,
    /// Estimated cost of day-hour consumption.
    pub high_tariff: f64,
}
