pub mod error;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use repo::ConsumptionRepository;
pub use service::{ConsumptionReportRow, Service};
