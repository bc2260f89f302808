// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::adapters::toml_config::{Config, LogFormat};
use crate::error::{MatchVideoError, MatchVideoResult};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to stderr
/// so command output on stdout stays clean.
pub fn init_logging(config: &Config) -> MatchVideoResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| MatchVideoError::Config(format!("Failed to initialize logging: {}", e)))
}
