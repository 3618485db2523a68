use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PERKS_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. `PERKS_LOG` takes precedence over the
/// filter from settings; without either only warnings are shown.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
