pub mod model;

pub use model::{PowerConsumptionRecord, RoiCalculation};
