//! Application runtime support: configuration loading and logging setup.

pub mod config;
pub mod logging;

pub use config::{AppConfig, AppConfigProvider, CliArgs, LoggingConfig};
pub use logging::init_logging;
