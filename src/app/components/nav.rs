//! Navigation component for the web UI.

use dioxus::prelude::*;

use super::ThemeSwitcher;
use crate::app::store_context::use_store;
use crate::app::Route;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "home", "dashboard")
    pub active: String,
}

/// Navigation bar with page links, session badge and theme toggle.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let ctx = use_store();
    let store = ctx.subscribe();
    let user_name = store.user_name();
    let logged_in = store.is_logged_in();

    let links = [
        ("home", Route::Home {}, "Home"),
        ("profile", Route::Profile {}, "Profile"),
        ("dashboard", Route::Dashboard {}, "Dashboard"),
        ("about", Route::About {}, "About"),
    ];

    rsx! {
        nav {
            ul {
                li {
                    strong { "SPA Shell" }
                }
            }
            ul {
                for (id, route, label) in links {
                    li { key: "{id}",
                        Link { to: route, active_class: "active".to_string(),
                            if props.active == id {
                                strong { "{label}" }
                            } else {
                                "{label}"
                            }
                        }
                    }
                }
            }
            ul {
                li {
                    if logged_in {
                        span { class: "badge", "{user_name}" }
                    } else {
                        span { class: "text-muted", "{user_name}" }
                    }
                }
                li { ThemeSwitcher {} }
            }
        }
    }
}
