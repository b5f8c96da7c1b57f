pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use ports::{PermissionsPort, UserPermission};
pub use service::Service;
