//! Tracing subscriber setup

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "papestash=debug,tower_http=debug";

/// Install the global subscriber: `RUST_LOG` if set, otherwise [`DEFAULT_LOG_FILTER`].
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(console_fmt)
        .try_init()?;

    tracing::info!("Tracing initialized");
    Ok(())
}
