use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::context::ModuleCtx;
use crate::contracts::Module;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("module '{module}' registered twice")]
    Duplicate { module: &'static str },

    #[error("module '{module}' failed to initialize")]
    Init {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

pub struct ModuleEntry {
    pub name: &'static str,
    pub core: Arc<dyn Module>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry").field("name", &self.name).finish()
    }
}

/// Explicitly-registered module set, initialized in registration order.
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.modules.iter().map(|m| m.name).collect();
        f.debug_struct("ModuleRegistry")
            .field("modules", &names)
            .finish()
    }
}

impl ModuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// Run the init phase: each module gets a context scoped to its name.
    pub async fn run_init_phase(&self, base_ctx: &ModuleCtx) -> Result<(), RegistryError> {
        for e in &self.modules {
            let ctx = base_ctx.clone().for_module(e.name);
            e.core
                .init(&ctx)
                .await
                .map_err(|source| RegistryError::Init {
                    module: e.name,
                    source,
                })?;
            info!(module = e.name, "module initialized");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<ModuleEntry>,
}

impl RegistryBuilder {
    pub fn with_module(mut self, name: &'static str, core: Arc<dyn Module>) -> Self {
        self.modules.push(ModuleEntry { name, core });
        self
    }

    pub fn build(self) -> Result<ModuleRegistry, RegistryError> {
        let mut seen = HashSet::new();
        for e in &self.modules {
            if !seen.insert(e.name) {
                return Err(RegistryError::Duplicate { module: e.name });
            }
        }
        Ok(ModuleRegistry {
            modules: self.modules,
        })
    }
}
