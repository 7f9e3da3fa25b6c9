use std::sync::Arc;

use chartlab_core::experiment::{ExperimentPhase, SessionSnapshot};
use chartlab_core::model::ChartVariant;
use services::{ChartService, ExperimentController, LoadedDataset};

use crate::views::ViewError;
use crate::vm::format_elapsed;

/// User actions exposed by the experiment page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExperimentIntent {
    Show,
    Answered,
    GoBack,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartVm {
    pub variant: ChartVariant,
    pub title: &'static str,
    pub svg: String,
}

/// Session controller plus whatever the page derives from its latest snapshot.
pub struct ExperimentVm {
    controller: ExperimentController,
    charts: Arc<ChartService>,
    data: Arc<LoadedDataset>,
    snapshot: SessionSnapshot,
    chart: Option<ChartVm>,
    chart_error: Option<ViewError>,
}

impl ExperimentVm {
    #[must_use]
    pub fn new(
        controller: ExperimentController,
        charts: Arc<ChartService>,
        data: Arc<LoadedDataset>,
    ) -> Self {
        let snapshot = controller.snapshot();
        let mut vm = Self {
            controller,
            charts,
            data,
            snapshot,
            chart: None,
            chart_error: None,
        };
        vm.sync_chart();
        vm
    }

    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn phase(&self) -> ExperimentPhase {
        self.snapshot.phase
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartVm> {
        self.chart.as_ref()
    }

    #[must_use]
    pub fn chart_error(&self) -> Option<ViewError> {
        self.chart_error
    }

    #[must_use]
    pub fn elapsed_message(&self) -> Option<String> {
        self.snapshot.elapsed.map(format_elapsed)
    }

    #[must_use]
    pub fn notice_message(&self) -> Option<&'static str> {
        self.snapshot.notice.map(|notice| notice.message())
    }

    /// Apply a user action and refresh derived state from the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::InvalidAction` if the action is not offered in the
    /// current phase; the session is left unchanged.
    pub fn dispatch(&mut self, intent: ExperimentIntent) -> Result<(), ViewError> {
        let result = match intent {
            ExperimentIntent::Show => self.controller.show(),
            ExperimentIntent::Answered => self.controller.mark_answered(),
            ExperimentIntent::GoBack => self.controller.reset(),
        };
        let snapshot = result.map_err(|err| {
            tracing::error!(error = %err, ?intent, "rejected experiment action");
            ViewError::InvalidAction
        })?;
        self.snapshot = snapshot;
        self.sync_chart();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut ExperimentController {
        &mut self.controller
    }

    fn sync_chart(&mut self) {
        let Some(variant) = self.snapshot.selected_chart else {
            self.chart = None;
            self.chart_error = None;
            return;
        };
        if self.chart.as_ref().is_some_and(|chart| chart.variant == variant) {
            return;
        }
        match self.charts.render(variant, &self.data.dataset) {
            Ok(image) => {
                self.chart = Some(ChartVm {
                    variant,
                    title: image.title(),
                    svg: image.svg().to_string(),
                });
                self.chart_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, chart = %variant, "chart rendering failed");
                self.chart = None;
                self.chart_error = Some(ViewError::ChartUnavailable);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlab_core::time::fixed_clock;
    use chrono::Duration;
    use dataset::BundledSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use services::DataOrigin;

    fn build_vm() -> ExperimentVm {
        let data = LoadedDataset {
            dataset: BundledSource::new().load().unwrap(),
            origin: DataOrigin::Primary {
                source: "test".into(),
            },
        };
        let controller =
            ExperimentController::new(fixed_clock()).with_rng(StdRng::seed_from_u64(5));
        ExperimentVm::new(controller, Arc::new(ChartService::new()), Arc::new(data))
    }

    #[test]
    fn show_renders_the_selected_chart() {
        let mut vm = build_vm();
        assert!(vm.chart().is_none());
        vm.dispatch(ExperimentIntent::Show).unwrap();
        let selected = vm.snapshot().selected_chart.unwrap();
        let chart = vm.chart().unwrap();
        assert_eq!(chart.variant, selected);
        assert_eq!(chart.title, selected.title());
        assert!(chart.svg.contains("<svg"));
    }

    #[test]
    fn answered_keeps_chart_and_formats_elapsed() {
        let mut vm = build_vm();
        vm.dispatch(ExperimentIntent::Show).unwrap();
        let before = vm.chart().cloned();
        vm.controller_mut()
            .clock_mut()
            .advance(Duration::milliseconds(3_500));
        vm.dispatch(ExperimentIntent::Answered).unwrap();
        assert_eq!(vm.phase(), ExperimentPhase::Answered);
        assert_eq!(vm.chart().cloned(), before);
        assert_eq!(
            vm.elapsed_message().as_deref(),
            Some("It took you 3.50 seconds to answer the question!")
        );
        assert!(vm.notice_message().is_none());
    }

    #[test]
    fn go_back_clears_chart() {
        let mut vm = build_vm();
        vm.dispatch(ExperimentIntent::Show).unwrap();
        vm.dispatch(ExperimentIntent::Answered).unwrap();
        vm.dispatch(ExperimentIntent::GoBack).unwrap();
        assert_eq!(vm.phase(), ExperimentPhase::Idle);
        assert!(vm.chart().is_none());
        assert!(vm.snapshot().is_default());
    }

    #[test]
    fn out_of_phase_intent_is_rejected() {
        let mut vm = build_vm();
        assert_eq!(
            vm.dispatch(ExperimentIntent::GoBack),
            Err(ViewError::InvalidAction)
        );
        assert_eq!(vm.phase(), ExperimentPhase::Idle);
    }
}
