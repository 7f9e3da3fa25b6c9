use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::ExperimentView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ExperimentView)] Experiment {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "app",
            Outlet::<Route> {}
        }
    }
}
