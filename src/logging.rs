//! Stderr tracing setup shared by the binaries.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directives, e.g. `CENSUS_LOG=debug`.
pub const LOG_ENV: &str = "CENSUS_LOG";

/// Install a stderr fmt subscriber. Stdout stays reserved for machine output.
/// Calling this twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
