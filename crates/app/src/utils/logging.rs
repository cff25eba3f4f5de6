//! Tracing setup and logging helpers for the binary.

use blendfeed_domain::FeedError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Selects JSON log lines when set to `json`.
pub const LOG_FORMAT_ENV: &str = "BLENDFEED_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Logs go to stderr so command
/// output on stdout stays clean. Calling this twice is harmless.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized");
    }
}

/// Convert a `FeedError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &FeedError) -> &'static str {
    match error {
        FeedError::Config(_) => "config",
        FeedError::InvalidInput(_) => "invalid_input",
        FeedError::Network(_) => "network",
        FeedError::Serialization(_) => "serialization",
        FeedError::NotFound(_) => "not_found",
        FeedError::Internal(_) => "internal",
    }
}
