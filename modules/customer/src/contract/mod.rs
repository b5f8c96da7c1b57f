pub mod client;
pub mod error;
pub mod model;

pub use client::{customer_users_query, CustomerRolesApi, CUSTOMER_ROLE};
pub use error::RolesError;
pub use model::{CustomerRecord, RoleCheck};
