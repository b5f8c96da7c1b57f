use serde::{Deserialize, Serialize};

/// Configuration for the customer module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerConfig {
    /// Base URL of the roles service the HTTP client talks to.
    #[serde(default = "default_roles_base_url")]
    pub roles_base_url: String,
    /// Per-request timeout for the roles RPC, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            roles_base_url: default_roles_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_roles_base_url() -> String {
    "http://roles.local".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}
