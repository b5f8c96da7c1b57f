use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main application configuration: a strongly-typed logging section and a
/// flexible per-module configuration bag.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging configuration (defaults apply if omitted).
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per-module configuration bag: module_name → arbitrary YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Base level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_level")]
    pub level: String,
    /// Optional env-filter directives (e.g. "info,customer=debug").
    /// Takes precedence over `level` when set.
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            filter: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// CLI arguments passed down to the config layer.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg: AppConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing configuration")
    }

    /// Apply CLI overrides. Verbosity flags win over the file's logging
    /// section, including any custom filter.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let level = match args.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            self.logging.level = level.to_string();
            self.logging.filter = None;
        }
    }
}

/// Owns the loaded configuration and serves raw per-module sections.
pub struct AppConfigProvider {
    config: AppConfig,
}

impl AppConfigProvider {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.config.modules.get(module_name)
    }
}
