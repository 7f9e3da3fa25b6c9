use std::sync::Arc;

use crate::charts::ChartService;
use crate::config::ServicesConfig;
use crate::experiment::ExperimentController;
use crate::loader::{DatasetLoader, LoadedDataset};
use crate::Clock;

/// Assembles app-facing services around the dataset loaded at startup.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    data: Arc<LoadedDataset>,
    charts: Arc<ChartService>,
}

impl AppServices {
    /// Load the dataset (with fallback) and build services around it.
    pub async fn load(config: &ServicesConfig, clock: Clock) -> Self {
        let data = DatasetLoader::from_config(config).load().await;
        Self::new(clock, data)
    }

    #[must_use]
    pub fn new(clock: Clock, data: LoadedDataset) -> Self {
        Self {
            clock,
            data: Arc::new(data),
            charts: Arc::new(ChartService::new()),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn data(&self) -> Arc<LoadedDataset> {
        Arc::clone(&self.data)
    }

    #[must_use]
    pub fn charts(&self) -> Arc<ChartService> {
        Arc::clone(&self.charts)
    }

    /// Fresh controller for a new user session; sessions never share state.
    #[must_use]
    pub fn new_controller(&self) -> ExperimentController {
        ExperimentController::new(self.clock)
    }
}
