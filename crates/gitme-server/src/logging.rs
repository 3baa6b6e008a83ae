//! Tracing subscriber setup and operation logging macros

use std::env;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Logging configuration for gitme
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level applied to the gitme crates when `RUST_LOG` is unset
    pub level: Level,
    /// Whether to include file and line numbers
    pub include_location: bool,
    /// Emit one JSON object per line instead of human readable output
    pub json_format: bool,
    /// Raw `RUST_LOG` directives; overrides `level` entirely
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Level::INFO, include_location: true, json_format: false, env_filter: None }
    }
}

impl LoggingConfig {
    /// Read `LOG_LEVEL`, `LOG_INCLUDE_LOCATION`, `LOG_JSON_FORMAT` and `RUST_LOG`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup("LOG_LEVEL")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.level),
            include_location: lookup("LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
            json_format: lookup("LOG_JSON_FORMAT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.json_format),
            env_filter: lookup("RUST_LOG").filter(|s| !s.is_empty()),
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init_tracing(&self) -> Result<()> {
        let env_filter = self.build_env_filter()?;

        let fmt_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_target(true)
                .boxed()
        } else {
            fmt::layer()
                .pretty()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_target(false)
                .with_writer(std::io::stderr)
                .boxed()
        };

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter> {
        let filter = match &self.env_filter {
            Some(directives) => EnvFilter::try_new(directives)?,
            None => EnvFilter::default()
                .add_directive(format!("gitme={}", self.level).parse()?)
                .add_directive(format!("gitme_server={}", self.level).parse()?)
                .add_directive(format!("gitme_services={}", self.level).parse()?)
                .add_directive(format!("gitme_domain={}", self.level).parse()?)
                .add_directive("tower_http=debug".parse()?)
                .add_directive("hyper=info".parse()?)
                .add_directive("reqwest=info".parse()?),
        };

        Ok(filter)
    }
}

/// Initialize production logging with JSON format
pub fn init_production_logging() -> Result<()> {
    let mut config = LoggingConfig::from_env();
    config.json_format = true;
    config.include_location = false;
    config.init_tracing()
}

/// Initialize development logging with pretty format on stderr
pub fn init_development_logging() -> Result<()> {
    let mut config = LoggingConfig::from_env();
    config.json_format = false;
    config.init_tracing()
}

/// Structured logging macros for common operations
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr, $($field:ident = $value:expr),*) => {
        tracing::info!(
            operation = $operation,
            status = "started",
            $($field = $value,)*
            "Operation started"
        );
    };
}

#[macro_export]
macro_rules! log_operation_success {
    ($operation:expr, $duration:expr, $($field:ident = $value:expr),*) => {
        tracing::info!(
            operation = $operation,
            status = "success",
            duration_ms = $duration.as_millis() as u64,
            $($field = $value,)*
            "Operation completed successfully"
        );
    };
}

#[macro_export]
macro_rules! log_operation_error {
    ($operation:expr, $error:expr, $($field:ident = $value:expr),*) => {
        tracing::error!(
            operation = $operation,
            status = "error",
            error = %$error,
            $($field = $value,)*
            "Operation failed"
        );
    };
}
