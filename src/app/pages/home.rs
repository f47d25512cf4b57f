//! Landing page.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::store_context::use_store;
use crate::app::Route;

#[component]
pub fn Home() -> Element {
    let ctx = use_store();
    let store = ctx.subscribe();
    let greeting = format!("Welcome, {}", store.user_name());
    let logged_in = store.is_logged_in();

    rsx! {
        Layout { nav_active: "home".to_string(),
            section { class: "hero",
                h1 { "{greeting}" }
                p {
                    "A single-page app with client-side routing, a shared state store, "
                    "and a REST client with uniform error handling."
                }
                div { class: "flex gap-2",
                    if logged_in {
                        Link { to: Route::Dashboard {}, class: "btn btn-primary", "Open dashboard" }
                    } else {
                        Link { to: Route::Profile {}, class: "btn btn-primary", "Log in" }
                    }
                    Link { to: Route::About {}, class: "btn", "About" }
                }
            }
        }
    }
}
