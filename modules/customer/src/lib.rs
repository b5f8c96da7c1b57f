//! Customer form handler module.
//!
//! Keeps a Customer record's display name in sync with its name parts and
//! enforces that the linked user account holds the Customer role, via a
//! typed remote predicate. Business-rule rejections block the save;
//! transport failures only raise a non-blocking notification.

pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod handler;
pub mod infra;
pub mod module;

pub use config::CustomerConfig;
pub use contract::client::CustomerRolesApi;
pub use contract::model::CustomerRecord;
pub use handler::CustomerFormHandler;
pub use module::CustomerFormModule;
