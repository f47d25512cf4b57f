//! Catch-all page.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        Layout { nav_active: String::new(),
            article { class: "text-center",
                h1 { "404" }
                p { "No page at " code { "{path}" } }
                Link { to: Route::Home {}, class: "btn btn-primary", "Back to home" }
            }
        }
    }
}
