use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative candidate filter for a link-field record picker.
///
/// The handler builds one of these and installs it on the form; the host's
/// picker UI consumes it to restrict the candidate list. This is a pure
/// filter definition - it never replaces the authoritative server-side
/// validation of the chosen value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkQuery {
    /// Named server-side query the picker should run.
    pub source: String,
    /// Extra equality filters passed to the query.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl LinkQuery {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}
