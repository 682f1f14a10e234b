use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "NEXUS_IDL_LOG";

/// Installs the stderr subscriber. An explicit level wins over `NEXUS_IDL_LOG`; without
/// either only warnings are shown.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
