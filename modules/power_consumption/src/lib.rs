//! Power consumption form module.
//!
//! Validates that consumption readings are never dated in the future and,
//! once a reading is persisted, folds it into the monthly ROI calculation
//! for its customer (average load plus low/high tariff cost estimates).

pub mod config;
pub mod contract;
pub mod domain;
pub mod handler;
pub mod infra;
pub mod module;

pub use config::PowerConsumptionConfig;
pub use contract::model::{PowerConsumptionRecord, RoiCalculation};
pub use domain::repo::ConsumptionRepository;
pub use handler::PowerConsumptionFormHandler;
pub use infra::storage::InMemoryConsumptionStore;
pub use module::PowerConsumptionFormModule;
