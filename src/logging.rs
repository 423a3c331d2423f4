//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::{FloodAidError, Result};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. Logs always go to stderr so stdout stays clean for
/// command output.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| FloodAidError::general(format!("Failed to initialise logging: {e}")))
}

fn default_directive(level: &str) -> String {
    format!("floodaid={level},tower_http={level}")
}
