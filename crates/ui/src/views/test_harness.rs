use std::sync::Arc;

use chartlab_core::model::Dataset;
use chartlab_core::time::fixed_clock;
use dataset::BundledSource;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    ChartService, DataOrigin, DataSourceUnavailable, ExperimentController, LoadedDataset,
};

use super::experiment::ExperimentTestHandles;
use crate::context::{UiApp, build_app_context};
use crate::views::ExperimentView;
use crate::vm::{ExperimentIntent, ExperimentVm};

#[derive(Clone)]
struct TestApp {
    data: Arc<LoadedDataset>,
    charts: Arc<ChartService>,
    seed: u64,
}

impl UiApp for TestApp {
    fn data(&self) -> Arc<LoadedDataset> {
        Arc::clone(&self.data)
    }

    fn charts(&self) -> Arc<ChartService> {
        Arc::clone(&self.charts)
    }

    fn new_controller(&self) -> ExperimentController {
        ExperimentController::new(fixed_clock()).with_rng(StdRng::seed_from_u64(self.seed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    Primary,
    Fallback,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: ExperimentTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.handles.clone());
    rsx! { ExperimentView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: ExperimentTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Fire an intent as if its button had been clicked.
    pub fn dispatch(&mut self, intent: ExperimentIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Run `f` against the live view-model inside the dioxus runtime.
    pub fn with_vm<R>(&mut self, f: impl FnOnce(&mut ExperimentVm) -> R) -> R {
        let mut vm = self.handles.vm();
        let out = self.dom.in_runtime(|| f(&mut vm.write()));
        drive_dom(&mut self.dom);
        out
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn bundled() -> Dataset {
    BundledSource::new().load().expect("bundled dataset")
}

pub fn setup_view_harness(data: DataKind) -> ViewHarness {
    let origin = match data {
        DataKind::Primary => DataOrigin::Primary {
            source: "spreadsheet".to_string(),
        },
        DataKind::Fallback => DataOrigin::Fallback {
            warning: DataSourceUnavailable {
                source: "spreadsheet".to_string(),
                fallback: "bundled Titanic dataset".to_string(),
                details: "data source is not configured".to_string(),
            },
        },
    };
    let app = Arc::new(TestApp {
        data: Arc::new(LoadedDataset {
            dataset: bundled(),
            origin,
        }),
        charts: Arc::new(ChartService::new()),
        seed: 17,
    });
    let handles = ExperimentTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness { dom, handles };
    harness.rebuild();
    harness
}
