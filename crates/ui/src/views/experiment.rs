use dioxus::prelude::*;

use chartlab_core::experiment::ExperimentPhase;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{DataNoticeVm, ExperimentIntent, ExperimentVm, map_data_notice};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const INTRO: &str = "This app runs an A/B testing experiment on the Titanic dataset. \
The objective is to find out which chart better helps answer the core question.";

const BUSINESS_QUESTION: &str = "Which combination of passenger class and gender is most \
strongly associated with higher survival rates?";

#[component]
pub fn ExperimentView() -> Element {
    let ctx = use_context::<AppContext>();
    let notice = map_data_notice(&ctx.data());
    let mut vm = use_signal(|| ExperimentVm::new(ctx.new_controller(), ctx.charts(), ctx.data()));
    let mut error = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |intent: ExperimentIntent| {
        let result = vm.write().dispatch(intent);
        error.set(result.err());
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ExperimentTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let (phase, chart, chart_error, elapsed_message, notice_message) = {
        let vm = vm.read();
        (
            vm.phase(),
            vm.chart().cloned(),
            vm.chart_error(),
            vm.elapsed_message(),
            vm.notice_message(),
        )
    };

    rsx! {
        div { class: "page experiment-page",
            header { class: "view-header",
                h1 { class: "view-title", "Titanic A/B Testing Experiment" }
                p { class: "view-subtitle", "{INTRO}" }
            }

            DataNotice { notice }

            section { class: "business-question",
                h3 { "Business Question" }
                p { "{BUSINESS_QUESTION}" }
            }

            section { class: "instructions",
                h2 { "Experiment Instructions" }
                ol {
                    li { "Click " strong { "\"Show a chart\"" } " to randomly display one of the two charts." }
                    li { "Study the chart to answer the business question." }
                    li { "When you're ready, click " strong { "\"I answered your question\"" } " to record your response time." }
                }
            }

            if phase == ExperimentPhase::Idle {
                button {
                    id: "experiment-show",
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| dispatch.call(ExperimentIntent::Show),
                    "Show a chart"
                }
            }

            if let Some(chart) = chart {
                section { class: "chart-panel",
                    h3 { "Your Randomly Selected Chart" }
                    div {
                        class: "chart",
                        "data-chart": "{chart.variant}",
                        dangerous_inner_html: "{chart.svg}",
                    }
                }
            }

            if let Some(err) = chart_error {
                p { class: "alert alert-error", "{err.message()}" }
            }

            if phase == ExperimentPhase::Showing {
                button {
                    id: "experiment-answered",
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| dispatch.call(ExperimentIntent::Answered),
                    "I answered your question"
                }
            }

            if phase == ExperimentPhase::Answered {
                if let Some(message) = notice_message {
                    p { class: "alert alert-error", "{message}" }
                }
                if let Some(message) = elapsed_message {
                    p { class: "alert alert-success", strong { "{message}" } }
                }
                button {
                    id: "experiment-go-back",
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| dispatch.call(ExperimentIntent::GoBack),
                    "Go Back"
                }
            }

            if let Some(err) = error() {
                p { class: "alert alert-error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn DataNotice(notice: DataNoticeVm) -> Element {
    rsx! {
        div { class: notice.kind.css_class(),
            p { "{notice.message}" }
            if let Some(details) = notice.details.as_ref() {
                p { class: "alert-details", "{details}" }
            }
            p { class: "alert-details", "{notice.rows_label}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExperimentTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ExperimentIntent>>>>,
    vm: Rc<RefCell<Option<Signal<ExperimentVm>>>>,
}

#[cfg(test)]
impl ExperimentTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ExperimentIntent>, vm: Signal<ExperimentVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<ExperimentIntent> {
        (*self.dispatch.borrow()).expect("experiment dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<ExperimentVm> {
        (*self.vm.borrow()).expect("experiment vm registered")
    }
}
