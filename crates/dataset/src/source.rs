use async_trait::async_trait;
use chartlab_core::model::{Dataset, DatasetError};
use thiserror::Error;

/// Errors surfaced by dataset sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("data source is not configured")]
    NotConfigured,

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("malformed row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// A tabular source of passenger rows with `pclass`, `sex` and `survived` columns.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable name used in logs and warnings.
    fn name(&self) -> &str;

    /// Fetch and validate the full dataset.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source is unreachable or the data is malformed.
    async fn fetch(&self) -> Result<Dataset, SourceError>;
}

/// Source serving a dataset that is already in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    dataset: Dataset,
}

impl InMemorySource {
    #[must_use]
    pub fn new(name: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            name: name.into(),
            dataset,
        }
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        Ok(self.dataset.clone())
    }
}

/// Source that always fails; stands in for an unreachable remote.
#[derive(Debug, Clone)]
pub struct FailingSource {
    name: String,
    reason: String,
}

impl FailingSource {
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        Err(SourceError::Unavailable(self.reason.clone()))
    }
}
