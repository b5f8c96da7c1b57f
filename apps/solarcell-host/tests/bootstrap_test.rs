//! End-to-end wiring: YAML config through the registry into live form
//! sessions, the way `main` assembles the host.

use std::io::Write;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use formkit::{
    ClientHub, ConfigProvider, FixedClock, FormSession, FormState, InMemoryStore,
    ModuleCtxBuilder, ModuleRegistry,
};

use customer::gateways::local::LocalRolesDirectory;
use customer::{CustomerFormModule, CustomerRecord, CustomerRolesApi};
use power_consumption::{
    ConsumptionRepository, InMemoryConsumptionStore, PowerConsumptionFormModule,
    PowerConsumptionRecord,
};
use runtime::{AppConfig, AppConfigProvider};

struct Adapter(Arc<AppConfigProvider>);

impl ConfigProvider for Adapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

struct Host {
    customer: Arc<CustomerFormModule>,
    power: Arc<PowerConsumptionFormModule>,
    consumption_store: Arc<InMemoryConsumptionStore>,
}

async fn boot(yaml: &str) -> Host {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{yaml}").unwrap();
    let config = AppConfig::load(file.path()).unwrap();

    let hub = Arc::new(ClientHub::default());
    let consumption_store = Arc::new(InMemoryConsumptionStore::new());
    hub.register::<dyn ConsumptionRepository>(consumption_store.clone());
    hub.register::<dyn CustomerRolesApi>(Arc::new(LocalRolesDirectory::with_emails([
        "jane@solarcell.test",
    ])));

    let ctx = ModuleCtxBuilder::new()
        .with_client_hub(hub)
        .with_config_provider(Arc::new(Adapter(Arc::new(AppConfigProvider::new(config)))))
        .with_clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
        )))
        .build();

    let customer = Arc::new(CustomerFormModule::default());
    let power = Arc::new(PowerConsumptionFormModule::default());
    ModuleRegistry::builder()
        .with_module(customer::module::MODULE_NAME, customer.clone())
        .with_module(power_consumption::module::MODULE_NAME, power.clone())
        .build()
        .unwrap()
        .run_init_phase(&ctx)
        .await
        .unwrap();

    Host {
        customer,
        power,
        consumption_store,
    }
}

#[tokio::test]
async fn configured_host_runs_both_form_flows() {
    let host = boot(
        "logging:\n  level: info\nmodules:\n  power_consumption:\n    low_tariff_rate: 0.2\n",
    )
    .await;

    // Customer flow: known account, derived display name.
    let store = Arc::new(InMemoryStore::<CustomerRecord>::new());
    let mut session = FormSession::open(
        host.customer.handler().unwrap(),
        store.clone(),
        FormState::new(
            "CUST-0001",
            true,
            CustomerRecord {
                first_name: "Jane".into(),
                last_name: Some("Doe".into()),
                email: Some("jane@solarcell.test".into()),
                ..Default::default()
            },
        ),
    )
    .await
    .unwrap();
    session.save().await.unwrap();
    assert_eq!(session.record().full_name, "Jane Doe");

    // Consumption flow: a night reading, aggregated with the configured rate.
    let mut session = FormSession::open(
        host.power.handler().unwrap(),
        host.consumption_store.clone(),
        FormState::new(
            "PC-0001",
            true,
            PowerConsumptionRecord {
                customer: "CUST-0001".into(),
                date: Some(Utc.with_ymd_and_hms(2025, 6, 10, 23, 30, 0).unwrap()),
                kw: 2.0,
                kwh: 10.0,
            },
        ),
    )
    .await
    .unwrap();
    session.save().await.unwrap();

    let rows = host.consumption_store.roi_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "CUST-0001--June--2025-1");
    assert!((rows[0].low_tariff - 0.2 * 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_account_is_rejected_through_the_full_stack() {
    let host = boot("modules: {}\n").await;

    let store = Arc::new(InMemoryStore::<CustomerRecord>::new());
    let mut session = FormSession::open(
        host.customer.handler().unwrap(),
        store.clone(),
        FormState::new(
            "CUST-0002",
            true,
            CustomerRecord {
                first_name: "Sam".into(),
                email: Some("stranger@solarcell.test".into()),
                ..Default::default()
            },
        ),
    )
    .await
    .unwrap();

    let err = session.save().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Only Users with Customer roles can be associated with the Customer document"
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn fixed_clock_rejects_future_readings_everywhere() {
    let host = boot("modules: {}\n").await;

    let mut session = FormSession::open(
        host.power.handler().unwrap(),
        host.consumption_store.clone(),
        FormState::new(
            "PC-0009",
            true,
            PowerConsumptionRecord {
                customer: "CUST-0001".into(),
                date: Some(Utc.with_ymd_and_hms(2025, 6, 16, 0, 0, 0).unwrap()),
                kw: 1.0,
                kwh: 1.0,
            },
        ),
    )
    .await
    .unwrap();

    let err = session.save().await.unwrap_err();
    assert!(err.is_validation());
    assert!(host.consumption_store.roi_rows().is_empty());
}
