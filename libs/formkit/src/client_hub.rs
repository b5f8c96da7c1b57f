//! Type-safe client registry.
//!
//! Providers register an implementation once; consumers fetch by *interface
//! type* (trait object): `get::<dyn customer::CustomerRolesApi>()`. For
//! testing, just register a mock under the same trait type.
//!
//! Key = fully-qualified `type_name::<T>()`, which works for `T = dyn Trait`.
//! Value = `Arc<T>` stored as `Box<dyn Any + Send + Sync>` (downcast on
//! read). Re-registering overwrites atomically; Arcs already held by
//! consumers stay valid.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, sync::Arc};

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client not found: type={type_name}")]
    NotFound { type_name: &'static str },

    #[error("type mismatch in hub for type={type_name}")]
    TypeMismatch { type_name: &'static str },
}

type Boxed = Box<dyn Any + Send + Sync>;

/// Type-keyed registry of `Arc<dyn Trait>` clients.
pub struct ClientHub {
    map: RwLock<HashMap<&'static str, Boxed>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Register a client under the interface type `T`.
    /// `T` is usually a trait object like `dyn contract::CustomerRolesApi`.
    pub fn register<T>(&self, client: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = std::any::type_name::<T>();
        self.map.write().insert(key, Box::new(client));
    }

    /// Fetch a client by interface type `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, ClientHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = std::any::type_name::<T>();
        let map = self.map.read();
        let boxed = map
            .get(key)
            .ok_or(ClientHubError::NotFound { type_name: key })?;

        // Stored value is exactly `Arc<T>`; downcast is safe and cheap.
        boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ClientHubError::TypeMismatch { type_name: key })
    }

    /// Remove a client; returns it if it was present.
    pub fn remove<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = std::any::type_name::<T>();
        let boxed = self.map.write().remove(key)?;
        boxed.downcast::<Arc<T>>().ok().map(|b| *b)
    }

    /// Clear everything (useful in tests).
    pub fn clear(&self) {
        self.map.write().clear();
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl Default for ClientHub {
    fn default() -> Self {
        Self::new()
    }
}
