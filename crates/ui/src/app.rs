use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

pub const WINDOW_TITLE: &str = "Titanic A/B Testing";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{WINDOW_TITLE}" }

        div { class: "app-root",
            ErrorBoundary { handle_error: experiment_crashed, Router::<Route> {} }
        }
    }
}

/// Last-resort screen when a view panics or bubbles an error up.
fn experiment_crashed(errors: ErrorContext) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "The experiment stopped unexpectedly" }
            p { "Restart the app to begin a new session." }
            pre { "{errors:?}" }
        }
    }
}
