#![forbid(unsafe_code)]

pub mod app_services;
pub mod charts;
pub mod config;
pub mod error;
pub mod experiment;
pub mod loader;

pub use chartlab_core::Clock;

pub use app_services::AppServices;
pub use charts::{ChartImage, ChartService};
pub use config::ServicesConfig;
pub use error::{ChartError, ConfigError};
pub use experiment::ExperimentController;
pub use loader::{DataOrigin, DataSourceUnavailable, DatasetLoader, LoadedDataset};
