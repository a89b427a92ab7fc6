use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let installed = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .try_init()
    .is_ok();

  if installed {
    tracing::debug!("Logging initialized");
  }
}
