use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing::{info, warn};

use customer::gateways::local::LocalRolesDirectory;
use customer::{CustomerFormModule, CustomerRecord, CustomerRolesApi};
use formkit::{
    ClientHub, FormSession, FormState, InMemoryStore, ModuleCtxBuilder, ModuleRegistry,
};
use power_consumption::{
    ConsumptionRepository, InMemoryConsumptionStore, PowerConsumptionFormModule,
    PowerConsumptionRecord,
};
use runtime::{init_logging, AppConfig, AppConfigProvider, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Adapter to make AppConfigProvider implement formkit::ConfigProvider
struct FormkitConfigAdapter(Arc<AppConfigProvider>);

impl formkit::ConfigProvider for FormkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// SolarCell host - form modules for customer and power consumption records
#[derive(Parser)]
#[command(name = "solarcell-host")]
#[command(about = "SolarCell host - form modules for customer and power consumption records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use a local in-process roles directory instead of the HTTP client
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Wire the modules and run the smoke scenario
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    init_logging(&config.logging);
    info!("SolarCell host starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_host(config, cli.mock).await,
        Commands::Check => check_config(config),
    }
}

async fn run_host(config: AppConfig, mock: bool) -> Result<()> {
    info!("Initializing modules...");

    let hub = Arc::new(ClientHub::default());

    // One in-memory backend serves both the reading store and the ROI
    // repository, so just-saved readings are visible to aggregation.
    let consumption_store = Arc::new(InMemoryConsumptionStore::new());
    hub.register::<dyn ConsumptionRepository>(consumption_store.clone());

    if mock {
        let directory = Arc::new(LocalRolesDirectory::with_emails(["jane@solarcell.test"]));
        hub.register::<dyn CustomerRolesApi>(directory);
        info!("using local roles directory (--mock)");
    }

    let provider = Arc::new(FormkitConfigAdapter(Arc::new(AppConfigProvider::new(
        config,
    ))));
    let ctx = ModuleCtxBuilder::new()
        .with_client_hub(hub)
        .with_config_provider(provider)
        .build();

    let customer_module = Arc::new(CustomerFormModule::default());
    let power_module = Arc::new(PowerConsumptionFormModule::default());
    let registry = ModuleRegistry::builder()
        .with_module(customer::module::MODULE_NAME, customer_module.clone())
        .with_module(power_consumption::module::MODULE_NAME, power_module.clone())
        .build()?;
    registry.run_init_phase(&ctx).await?;

    smoke_scenario(&customer_module, &power_module, consumption_store).await
}

/// Drive both form handlers through a representative edit session and log
/// the outcomes. Rule violations are part of the demonstration and never
/// fail the process.
async fn smoke_scenario(
    customer_module: &CustomerFormModule,
    power_module: &PowerConsumptionFormModule,
    consumption_store: Arc<InMemoryConsumptionStore>,
) -> Result<()> {
    let customer_store = Arc::new(InMemoryStore::<CustomerRecord>::new());

    let record = CustomerRecord {
        first_name: "Jane".into(),
        last_name: Some("Doe".into()),
        email: Some("jane@solarcell.test".into()),
        ..Default::default()
    };
    let mut session = FormSession::open(
        customer_module.handler()?,
        customer_store.clone(),
        FormState::new("CUST-0001", true, record),
    )
    .await?;

    match session.save().await {
        Ok(()) => info!(
            full_name = %session.record().full_name,
            "customer CUST-0001 saved"
        ),
        Err(e) => warn!(error = %e, "customer CUST-0001 rejected"),
    }

    // Switching to an unknown account demonstrates the immediate re-check.
    let changed = session
        .update_field("email", |r| {
            r.email = Some("stranger@solarcell.test".into());
        })
        .await;
    if let Err(e) = changed {
        warn!(error = %e, "email change rejected");
    }

    let reading = PowerConsumptionRecord {
        customer: "CUST-0001".into(),
        date: Some(chrono::Utc::now()),
        kw: 2.4,
        kwh: 11.5,
    };
    let mut session = FormSession::open(
        power_module.handler()?,
        consumption_store.clone(),
        FormState::new("PC-0001", true, reading),
    )
    .await?;
    session.save().await?;
    info!(aggregates = consumption_store.roi_rows().len(), "reading PC-0001 saved");

    // A future-dated reading must bounce off validation.
    let future = PowerConsumptionRecord {
        customer: "CUST-0001".into(),
        date: Some(chrono::Utc::now() + chrono::Duration::days(1)),
        kw: 1.0,
        kwh: 4.0,
    };
    let mut session = FormSession::open(
        power_module.handler()?,
        consumption_store.clone(),
        FormState::new("PC-0002", true, future),
    )
    .await?;
    match session.save().await {
        Ok(()) => warn!("future-dated reading was accepted unexpectedly"),
        Err(e) => info!(error = %e, "future-dated reading rejected as intended"),
    }

    let report = power_module
        .service()?
        .average_consumption_report(None, None)
        .await?;
    for row in &report {
        info!(
            customer = %row.customer,
            average_kw = row.average_kw,
            average_kwh = row.average_kwh,
            "report row"
        );
    }

    info!("smoke scenario finished");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
