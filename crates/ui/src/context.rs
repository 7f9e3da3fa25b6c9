use std::sync::Arc;

use services::{ChartService, ExperimentController, LoadedDataset};

/// What the presentation layer needs from the composition root.
pub trait UiApp: Send + Sync {
    fn data(&self) -> Arc<LoadedDataset>;
    fn charts(&self) -> Arc<ChartService>;

    /// A controller for a brand-new user session.
    fn new_controller(&self) -> ExperimentController;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    data: Arc<LoadedDataset>,
    charts: Arc<ChartService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let data = app.data();
        let charts = app.charts();
        Self { app, data, charts }
    }

    #[must_use]
    pub fn data(&self) -> Arc<LoadedDataset> {
        Arc::clone(&self.data)
    }

    #[must_use]
    pub fn charts(&self) -> Arc<ChartService> {
        Arc::clone(&self.charts)
    }

    #[must_use]
    pub fn new_controller(&self) -> ExperimentController {
        self.app.new_controller()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
