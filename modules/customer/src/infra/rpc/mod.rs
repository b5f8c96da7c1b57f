pub mod http_roles_client;

pub use http_roles_client::HttpRolesClient;
