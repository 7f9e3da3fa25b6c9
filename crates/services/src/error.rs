//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `ChartService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Errors emitted while reading `ServicesConfig` from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var} value: {raw}")]
    InvalidTimeout { var: &'static str, raw: String },
}
