use std::sync::Arc;

use async_trait::async_trait;
use formkit::{Module, ModuleCtx};
use tracing::{debug, info};

use crate::config::CustomerConfig;
use crate::contract::client::CustomerRolesApi;
use crate::domain::ports::PermissionsPort;
use crate::domain::service::Service;
use crate::handler::CustomerFormHandler;
use crate::infra::permissions::InMemoryPermissions;
use crate::infra::rpc::HttpRolesClient;

pub const MODULE_NAME: &str = "customer";

/// Customer module: wires the roles client and permission port into the
/// domain service during the init phase.
#[derive(Default)]
pub struct CustomerFormModule {
    service: arc_swap::ArcSwapOption<Service>,
}

#[async_trait]
impl Module for CustomerFormModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing customer module");
        let cfg: CustomerConfig = ctx.module_config();
        let hub = ctx.client_hub();

        // A pre-registered client (local directory, test mock) wins over
        // the HTTP adapter built from config.
        let roles: Arc<dyn CustomerRolesApi> = match hub.get::<dyn CustomerRolesApi>() {
            Ok(client) => {
                debug!("using roles client from the hub");
                client
            }
            Err(_) => {
                let client: Arc<dyn CustomerRolesApi> =
                    Arc::new(HttpRolesClient::from_config(&cfg)?);
                hub.register::<dyn CustomerRolesApi>(client.clone());
                debug!(base_url = %cfg.roles_base_url, "registered HTTP roles client");
                client
            }
        };

        let permissions: Arc<dyn PermissionsPort> = match hub.get::<dyn PermissionsPort>() {
            Ok(port) => port,
            Err(_) => {
                let port: Arc<dyn PermissionsPort> = Arc::new(InMemoryPermissions::new());
                hub.register::<dyn PermissionsPort>(port.clone());
                debug!("registered in-memory permissions port");
                port
            }
        };

        let service = Service::new(roles, permissions, ctx.notifier());
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }
}

impl CustomerFormModule {
    /// Build the form handler. Requires `init` to have run.
    pub fn handler(&self) -> anyhow::Result<Arc<CustomerFormHandler>> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("customer module not initialized"))?;
        Ok(Arc::new(CustomerFormHandler::new(service)))
    }
}
