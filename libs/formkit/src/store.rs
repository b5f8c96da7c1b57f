use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence port for one record type. The real storage engine belongs to
/// the host framework; modules and tests use the in-memory adapter below.
#[async_trait]
pub trait RecordStore<R: Clone + Send + Sync + 'static>: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<R>, StoreError>;
    async fn save(&self, name: &str, record: R) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<(String, R)>, StoreError>;
}

/// In-memory record store keyed by record name.
pub struct InMemoryStore<R> {
    records: RwLock<HashMap<String, R>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> RecordStore<R> for InMemoryStore<R> {
    async fn load(&self, name: &str) -> Result<Option<R>, StoreError> {
        Ok(self.records.read().get(name).cloned())
    }

    async fn save(&self, name: &str, record: R) -> Result<(), StoreError> {
        self.records.write().insert(name.to_string(), record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<(String, R)>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
