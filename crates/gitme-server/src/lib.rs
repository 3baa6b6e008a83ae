//! GitMe server: HTTP API, configuration and logging around the README pipeline

pub mod api;
pub mod config;
pub mod errors;
pub mod logging;

pub use api::{AppState, router, serve};
pub use config::AppConfig;
pub use errors::{ApiError, Result, ServerError};
pub use logging::{LoggingConfig, init_development_logging, init_production_logging};
