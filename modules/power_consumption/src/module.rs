use std::sync::Arc;

use async_trait::async_trait;
use formkit::{Module, ModuleCtx};
use tracing::{debug, info};

use crate::config::PowerConsumptionConfig;
use crate::domain::repo::ConsumptionRepository;
use crate::domain::service::Service;
use crate::handler::PowerConsumptionFormHandler;
use crate::infra::storage::InMemoryConsumptionStore;

pub const MODULE_NAME: &str = "power_consumption";

/// Power consumption module: wires the repository port and the host clock
/// into the domain service during the init phase.
#[derive(Default)]
pub struct PowerConsumptionFormModule {
    service: arc_swap::ArcSwapOption<Service>,
}

#[async_trait]
impl Module for PowerConsumptionFormModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing power consumption module");
        let cfg: PowerConsumptionConfig = ctx.module_config();
        let hub = ctx.client_hub();

        // A pre-registered repository (host backend, test double) wins over
        // the default in-memory store.
        let repo: Arc<dyn ConsumptionRepository> = match hub.get::<dyn ConsumptionRepository>() {
            Ok(repo) => {
                debug!("using consumption repository from the hub");
                repo
            }
            Err(_) => {
                let repo: Arc<dyn ConsumptionRepository> =
                    Arc::new(InMemoryConsumptionStore::new());
                hub.register::<dyn ConsumptionRepository>(repo.clone());
                debug!("registered in-memory consumption repository");
                repo
            }
        };

        let service = Service::new(repo, ctx.clock(), cfg);
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }
}

impl PowerConsumptionFormModule {
    /// Build the form handler. Requires `init` to have run.
    pub fn handler(&self) -> anyhow::Result<Arc<PowerConsumptionFormHandler>> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("power consumption module not initialized"))?;
        Ok(Arc::new(PowerConsumptionFormHandler::new(service)))
    }

    /// Direct access to the domain service, used by the host to run reports.
    pub fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("power consumption module not initialized"))
    }
}
