//! Layout component wrapping all pages.

use dioxus::prelude::*;

use super::nav::Nav;
use crate::app::store_context::use_store;
use crate::app::Route;
use crate::router::View;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Active navigation item ID
    pub nav_active: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
///
/// Every rendered location is fed to the history router, which sets the
/// document title and description and applies scroll behavior.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let ctx = use_store();
    let route = use_route::<Route>();
    let path = route.to_string();
    let unmatched = matches!(route, Route::NotFound { .. });
    let navigator = use_navigator();
    let version = env!("SPA_VERSION");

    use_effect(use_reactive((&path, &unmatched), move |(path, unmatched)| {
        let Some(navigation) = ctx.navigate_to(&path) else {
            return;
        };
        // Route matching ignores case; render the declared route for the
        // matched location and follow auth redirects
        let case_only = unmatched && navigation.view != View::NotFound;
        if navigation.redirected_from.is_some() || case_only {
            let target = navigation.path.to_ascii_lowercase();
            match target.parse::<Route>() {
                Ok(route) => {
                    let _ = navigator.replace(route);
                }
                Err(e) => tracing::warn!("Redirect target {} not routable: {}", target, e),
            }
        }
    }));

    let can_go_back = ctx.can_go_back();

    rsx! {
        Nav { active: props.nav_active.clone() }
        main { class: "container mt-4",
            if can_go_back {
                button {
                    class: "btn btn-ghost btn-sm",
                    onclick: move |_| navigator.go_back(),
                    "← Back"
                }
            }
            {props.children}
        }
        footer { class: "container text-center py-3",
            small { class: "text-muted", "SPA Shell v{version}" }
        }
    }
}
