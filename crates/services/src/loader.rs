use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chartlab_core::model::Dataset;
use dataset::{BundledSource, DatasetSource, SheetSource};
use tracing::{info, warn};

use crate::config::ServicesConfig;

/// Non-fatal warning raised when the primary source could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceUnavailable {
    pub source: String,
    pub fallback: String,
    pub details: String,
}

impl fmt::Display for DataSourceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error loading the {}. Falling back to the {}.",
            self.source, self.fallback
        )
    }
}

/// Where the loaded rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Primary { source: String },
    Fallback { warning: DataSourceUnavailable },
}

/// Dataset plus the origin needed to tell the user how it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

impl LoadedDataset {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, DataOrigin::Fallback { .. })
    }

    #[must_use]
    pub fn warning(&self) -> Option<&DataSourceUnavailable> {
        match &self.origin {
            DataOrigin::Fallback { warning } => Some(warning),
            DataOrigin::Primary { .. } => None,
        }
    }
}

/// Loads the dataset once at startup, preferring the primary source.
#[derive(Clone)]
pub struct DatasetLoader {
    primary: Arc<dyn DatasetSource>,
    fallback: Arc<dyn DatasetSource>,
    timeout: Duration,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(
        primary: Arc<dyn DatasetSource>,
        fallback: Arc<dyn DatasetSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }

    /// Spreadsheet from the config as primary, bundled reference data as fallback.
    #[must_use]
    pub fn from_config(config: &ServicesConfig) -> Self {
        Self::new(
            Arc::new(SheetSource::new(config.sheet.clone())),
            Arc::new(BundledSource::new()),
            config.load_timeout,
        )
    }

    /// Fetch the dataset; never fails.
    ///
    /// Any primary failure (timeout, transport, malformed rows) switches to the
    /// fallback source and records a `DataSourceUnavailable` warning. If the
    /// fallback fails too, the bundled reference table is used.
    ///
    /// # Panics
    ///
    /// Panics only if the reference table compiled into the binary is corrupt.
    pub async fn load(&self) -> LoadedDataset {
        let primary = self.primary.name().to_string();
        let details = match tokio::time::timeout(self.timeout, self.primary.fetch()).await {
            Ok(Ok(dataset)) => {
                info!(source = %primary, rows = dataset.len(), "dataset loaded");
                return LoadedDataset {
                    dataset,
                    origin: DataOrigin::Primary { source: primary },
                };
            }
            Ok(Err(err)) => err.to_string(),
            Err(_) => format!("timed out after {:.1}s", self.timeout.as_secs_f64()),
        };
        warn!(source = %primary, error = %details, "primary dataset unavailable, using fallback");

        let (dataset, fallback) = match self.fallback.fetch().await {
            Ok(dataset) => (dataset, self.fallback.name().to_string()),
            Err(err) => {
                warn!(source = %self.fallback.name(), error = %err, "fallback dataset failed");
                let bundled = BundledSource::new();
                let dataset = bundled
                    .load()
                    .expect("bundled reference dataset should parse");
                (dataset, bundled.name().to_string())
            }
        };
        info!(source = %fallback, rows = dataset.len(), "fallback dataset loaded");

        LoadedDataset {
            dataset,
            origin: DataOrigin::Fallback {
                warning: DataSourceUnavailable {
                    source: primary,
                    fallback,
                    details,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlab_core::model::{Passenger, Pclass, Sex};
    use dataset::{FailingSource, InMemorySource};

    fn tiny() -> Dataset {
        Dataset::new(vec![Passenger::new(Pclass::First, Sex::Female, true)]).unwrap()
    }

    #[tokio::test]
    async fn primary_success_has_no_warning() {
        let loader = DatasetLoader::new(
            Arc::new(InMemorySource::new("sheet", tiny())),
            Arc::new(BundledSource::new()),
            Duration::from_secs(1),
        );
        let loaded = loader.load().await;
        assert!(!loaded.is_fallback());
        assert!(loaded.warning().is_none());
        assert_eq!(loaded.dataset.len(), 1);
    }

    #[tokio::test]
    async fn failing_primary_falls_back_with_details() {
        let loader = DatasetLoader::new(
            Arc::new(FailingSource::new("spreadsheet", "dns failure")),
            Arc::new(InMemorySource::new("reference", tiny())),
            Duration::from_secs(1),
        );
        let loaded = loader.load().await;
        let warning = loaded.warning().expect("fallback warning");
        assert_eq!(warning.details, "source unavailable: dns failure");
        assert_eq!(
            warning.to_string(),
            "Error loading the spreadsheet. Falling back to the reference."
        );
        assert_eq!(loaded.dataset, tiny());
    }

    #[tokio::test]
    async fn broken_fallback_uses_bundled_table() {
        let loader = DatasetLoader::new(
            Arc::new(FailingSource::new("spreadsheet", "down")),
            Arc::new(FailingSource::new("mirror", "also down")),
            Duration::from_secs(1),
        );
        let loaded = loader.load().await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.dataset.len(), 891);
    }
}
