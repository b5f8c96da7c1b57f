use serde::{Deserialize, Serialize};

/// Module configuration, read from the `power_consumption` key of the
/// application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerConsumptionConfig {
    /// Rate applied to the night-hour average consumption (23:00 to 05:59).
    #[serde(default = "default_low_tariff_rate")]
    pub low_tariff_rate: f64,

    /// Rate applied to the day-hour average consumption.
    #[serde(default = "default_high_tariff_rate")]
    pub high_tariff_rate: f64,
}

fn default_low_tariff_rate() -> f64 {
    0.1
}

fn default_high_tariff_rate() -> f64 {
    0.3
}

impl Default for PowerConsumptionConfig {
    fn default() -> Self {
        Self {
            low_tariff_rate: default_low_tariff_rate(),
            high_tariff_rate: default_high_tariff_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: PowerConsumptionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.low_tariff_rate, 0.1);
        assert_eq!(cfg.high_tariff_rate, 0.3);
    }

    #[test]
    fn explicit_rates_override_defaults() {
        let cfg: PowerConsumptionConfig =
            serde_json::from_str(r#"{"low_tariff_rate": 0.05, "high_tariff_rate": 0.4}"#).unwrap();
        assert_eq!(cfg.low_tariff_rate, 0.05);
        assert_eq!(cfg.high_tariff_rate, 0.4);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<PowerConsumptionConfig>(r#"{"tarif": 1.0}"#);
        assert!(err.is_err());
    }
}
