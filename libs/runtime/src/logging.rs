use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber from the logging section.
///
/// The explicit `filter` directives win over the plain `level`. Safe to call
/// more than once; later calls are no-ops (matters for tests).
pub fn init_logging(cfg: &LoggingConfig) {
    let directives = cfg
        .filter
        .clone()
        .unwrap_or_else(|| cfg.level.clone());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("invalid logging directives '{directives}': {e}; falling back to 'info'");
        EnvFilter::new("info")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
