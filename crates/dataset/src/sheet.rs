use std::env;

use async_trait::async_trait;
use chartlab_core::model::Dataset;
use reqwest::Client;

use crate::csv_table::parse_csv;
use crate::source::{DatasetSource, SourceError};

const SHEET_URL_ENV: &str = "CHARTLAB_SHEET_CSV_URL";
const SHEETS_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    pub csv_url: String,
}

impl SheetConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            csv_url: normalize_sheet_url(&url.into()),
        }
    }

    /// Reads `CHARTLAB_SHEET_CSV_URL`; blank or unset means "not configured".
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let url = env::var(SHEET_URL_ENV).ok()?;
        if url.trim().is_empty() {
            return None;
        }
        Some(Self::new(url))
    }
}

/// Turns a spreadsheet share/edit link into its CSV export link.
///
/// Any other URL is returned trimmed but otherwise unchanged.
#[must_use]
pub fn normalize_sheet_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(SHEETS_PREFIX) else {
        return trimmed.to_string();
    };
    if rest.contains("/export") || rest.contains("/pub") {
        return trimmed.to_string();
    }
    let id = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if id.is_empty() {
        return trimmed.to_string();
    }
    format!("{SHEETS_PREFIX}{id}/export?format=csv")
}

/// Remote spreadsheet published as CSV.
#[derive(Clone)]
pub struct SheetSource {
    client: Client,
    config: Option<SheetConfig>,
}

impl SheetSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SheetConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<SheetConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl DatasetSource for SheetSource {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        let config = self.config.as_ref().ok_or(SourceError::NotConfigured)?;

        let response = self.client.get(&config.csv_url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_csv(&body)
    }
}
