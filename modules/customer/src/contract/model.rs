use serde::{Deserialize, Serialize};

/// Customer record as edited in the form. Fields mirror the host doctype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Derived: recomputed from the name parts on every save.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Linked account name; picker candidates are restricted to accounts
    /// holding the Customer role.
    #[serde(default)]
    pub user: Option<String>,
}

/// Wire shape of the remote role predicate's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCheck {
    /// An account with the given email holds the Customer role.
    pub exists: bool,
}
