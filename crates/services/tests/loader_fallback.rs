use std::sync::Arc;
use std::time::Duration;

use chartlab_core::model::Dataset;
use dataset::{BundledSource, DatasetSource, SheetConfig, SourceError};
use services::{AppServices, Clock, DataOrigin, DatasetLoader, ServicesConfig};

struct SlowSource;

#[async_trait::async_trait]
impl DatasetSource for SlowSource {
    fn name(&self) -> &str {
        "slow sheet"
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(SourceError::Unavailable("unreachable".into()))
    }
}

struct MalformedSource;

#[async_trait::async_trait]
impl DatasetSource for MalformedSource {
    fn name(&self) -> &str {
        "sheet"
    }

    async fn fetch(&self) -> Result<Dataset, SourceError> {
        dataset::parse_csv("pclass,sex\n1,female\n")
    }
}

#[tokio::test]
async fn throwing_source_falls_back_without_error() {
    let loader = DatasetLoader::new(
        Arc::new(MalformedSource),
        Arc::new(BundledSource::new()),
        Duration::from_secs(5),
    );
    let loaded = loader.load().await;
    assert!(loaded.is_fallback());
    let warning = loaded.warning().unwrap();
    assert_eq!(warning.details, "missing required column `survived`");
    assert_eq!(warning.fallback, "bundled Titanic dataset");
    assert_eq!(loaded.dataset.len(), 891);
}

#[tokio::test]
async fn slow_source_times_out_and_falls_back() {
    let loader = DatasetLoader::new(
        Arc::new(SlowSource),
        Arc::new(BundledSource::new()),
        Duration::from_millis(50),
    );
    let started = std::time::Instant::now();
    let loaded = loader.load().await;
    assert!(started.elapsed() < Duration::from_secs(5));
    match loaded.origin {
        DataOrigin::Fallback { warning } => {
            assert_eq!(warning.source, "slow sheet");
            assert!(warning.details.starts_with("timed out"), "{}", warning.details);
        }
        DataOrigin::Primary { .. } => panic!("expected fallback"),
    }
}

#[tokio::test]
async fn unreachable_sheet_url_falls_back() {
    let config = ServicesConfig {
        // Port 9 (discard) on localhost is closed in test environments.
        sheet: Some(SheetConfig::new("http://127.0.0.1:9/titanic.csv")),
        load_timeout: Duration::from_secs(2),
    };
    let services = AppServices::load(&config, Clock::default_clock()).await;
    assert!(services.data().is_fallback());
    assert_eq!(services.data().dataset.len(), 891);
}

#[tokio::test]
async fn unconfigured_sheet_is_reported_as_fallback() {
    let services = AppServices::load(&ServicesConfig::default(), Clock::default_clock()).await;
    let data = services.data();
    let warning = data.warning().expect("warning");
    assert_eq!(warning.details, "data source is not configured");
    assert!(services.new_controller().snapshot().is_default());
}
