use async_trait::async_trait;
use chartlab_core::model::Dataset;

use crate::csv_table::parse_csv;
use crate::source::{DatasetSource, SourceError};

/// Reference Titanic passenger list (891 rows) compiled into the binary.
pub const TITANIC_CSV: &str = include_str!("../data/titanic.csv");

/// Offline fallback source backed by [`TITANIC_CSV`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse the bundled table synchronously.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` only if the embedded file is corrupt.
    pub fn load(&self) -> Result<Dataset, SourceError> {
        parse_csv(TITANIC_CSV)
    }
}

#[async_trait]
impl DatasetSource for BundledSource {
    fn name(&self) -> &str {
        "bundled Titanic dataset"
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        self.load()
    }
}
