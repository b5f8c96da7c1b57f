use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::client_hub::ClientHub;
use crate::clock::{Clock, SystemClock};
use crate::notify::{Notifier, TracingNotifier};

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Per-module view of the host environment handed to `Module::init`.
#[derive(Clone)]
pub struct ModuleCtx {
    client_hub: Arc<ClientHub>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new() -> Self {
        Self {
            inner: ModuleCtx {
                client_hub: Arc::new(ClientHub::default()),
                config_provider: None,
                notifier: Arc::new(TracingNotifier),
                clock: Arc::new(SystemClock),
                module_name: None,
            },
        }
    }

    pub fn with_client_hub(mut self, hub: Arc<ClientHub>) -> Self {
        self.inner.client_hub = hub;
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.inner.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.inner.clock = clock;
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl Default for ModuleCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name (used by the registry).
    pub(crate) fn for_module(mut self, name: &str) -> Self {
        self.module_name = Some(Arc::<str>::from(name));
        self
    }

    // ---- public read-only API for modules ----

    pub fn client_hub(&self) -> Arc<ClientHub> {
        self.client_hub.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Best-effort: deserialize the module's config section into `T`,
    /// falling back to `T::default()` if the section is missing or invalid.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> T {
        match (&self.module_name, &self.config_provider) {
            (Some(name), Some(p)) => p
                .get_module_config(name)
                .and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
                .unwrap_or_default(),
            _ => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct TestCfg {
        #[serde(default)]
        limit: u32,
    }

    struct OneSection(serde_json::Value);

    impl ConfigProvider for OneSection {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            (module_name == "m").then_some(&self.0)
        }
    }

    #[test]
    fn module_config_reads_own_section() {
        let ctx = ModuleCtxBuilder::new()
            .with_config_provider(Arc::new(OneSection(serde_json::json!({"limit": 9}))))
            .build()
            .for_module("m");
        assert_eq!(ctx.module_config::<TestCfg>(), TestCfg { limit: 9 });
        assert_eq!(ctx.current_module(), Some("m"));
    }

    #[test]
    fn missing_or_invalid_section_falls_back_to_default() {
        let ctx = ModuleCtxBuilder::new()
            .with_config_provider(Arc::new(OneSection(serde_json::json!({"limit": "nope"}))))
            .build()
            .for_module("other");
        assert_eq!(ctx.module_config::<TestCfg>(), TestCfg::default());

        let bad = ModuleCtxBuilder::new().build().for_module("m");
        assert_eq!(bad.module_config::<TestCfg>(), TestCfg::default());
    }
}
