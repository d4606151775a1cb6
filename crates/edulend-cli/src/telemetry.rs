use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid --log-level '{value}': {source}")]
    LogLevel {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("logging setup failed: {0}")]
    Subscriber(String),
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over the
/// `--log-level` flag; stdout stays reserved for command output.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))
}

fn level_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::LogLevel {
        value: log_level.to_string(),
        source,
    })
}
