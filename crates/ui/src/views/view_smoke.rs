use chrono::Duration;

use super::test_harness::{DataKind, setup_view_harness};
use crate::vm::ExperimentIntent;

#[test]
fn idle_view_renders_intro_and_show_button() {
    let harness = setup_view_harness(DataKind::Fallback);
    let html = harness.render();
    assert!(html.contains("Titanic A/B Testing Experiment"), "missing title in {html}");
    assert!(html.contains("Business Question"), "missing question in {html}");
    assert!(html.contains("Experiment Instructions"), "missing instructions in {html}");
    assert!(html.contains("experiment-show"), "missing show button in {html}");
    assert!(!html.contains("experiment-go-back"), "unexpected go back in {html}");
    assert!(!html.contains("<svg"), "unexpected chart in {html}");
}

#[test]
fn fallback_data_renders_warning_banner() {
    let harness = setup_view_harness(DataKind::Fallback);
    let html = harness.render();
    assert!(html.contains("alert-warning"), "missing warning in {html}");
    assert!(
        html.contains("Falling back to the bundled Titanic dataset."),
        "missing fallback text in {html}"
    );
    assert!(
        html.contains("Error details: data source is not configured"),
        "missing details in {html}"
    );
}

#[test]
fn primary_data_renders_success_banner() {
    let harness = setup_view_harness(DataKind::Primary);
    let html = harness.render();
    assert!(html.contains("alert-success"), "missing success in {html}");
    assert!(html.contains("891 passengers loaded"), "missing row count in {html}");
}

#[test]
fn full_cycle_swaps_buttons_and_reports_time() {
    let mut harness = setup_view_harness(DataKind::Primary);

    harness.dispatch(ExperimentIntent::Show);
    let html = harness.render();
    assert!(html.contains("Your Randomly Selected Chart"), "missing chart header in {html}");
    assert!(html.contains("<svg"), "missing chart in {html}");
    assert!(html.contains("experiment-answered"), "missing answer button in {html}");
    assert!(!html.contains("experiment-show"), "show button still visible in {html}");

    harness.with_vm(|vm| {
        vm.controller_mut()
            .clock_mut()
            .advance(Duration::milliseconds(3_500));
    });
    harness.dispatch(ExperimentIntent::Answered);
    let html = harness.render();
    assert!(
        html.contains("It took you 3.50 seconds to answer the question!"),
        "missing elapsed in {html}"
    );
    assert!(html.contains("experiment-go-back"), "missing go back in {html}");
    assert!(html.contains("<svg"), "chart should stay visible in {html}");
    assert!(
        !html.contains("experiment-answered"),
        "answer button still visible in {html}"
    );

    harness.dispatch(ExperimentIntent::GoBack);
    let html = harness.render();
    assert!(html.contains("experiment-show"), "missing show button in {html}");
    assert!(!html.contains("experiment-go-back"), "go back still visible in {html}");
    assert!(!html.contains("<svg"), "chart should be gone in {html}");
    assert!(harness.with_vm(|vm| vm.snapshot().is_default()));
}

#[test]
fn out_of_phase_action_shows_error_and_keeps_state() {
    let mut harness = setup_view_harness(DataKind::Primary);
    harness.dispatch(ExperimentIntent::GoBack);
    let html = harness.render();
    assert!(
        html.contains("That action is not available right now."),
        "missing error in {html}"
    );
    assert!(html.contains("experiment-show"), "missing show button in {html}");
}
