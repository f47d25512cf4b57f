//! About page.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::config::DEFAULT_BASE_URL;

#[component]
pub fn About() -> Element {
    let version = env!("SPA_VERSION");
    let git_sha = env!("SPA_GIT_SHA");
    let profile = env!("SPA_BUILD_PROFILE");

    rsx! {
        Layout { nav_active: "about".to_string(),
            article {
                h1 { "About" }
                p {
                    "Pages are rendered client-side. Navigation updates the document "
                    "title and description, restores scroll position on back/forward, "
                    "and scrolls smoothly to the top on new pages."
                }
                h2 { "Data" }
                p { "Users and posts come from " code { "{DEFAULT_BASE_URL}" } "." }
                h2 { "Persistence" }
                p { "Your session and theme choice are kept in local storage." }
                footer {
                    small { class: "text-muted", "Version {version} ({git_sha}, {profile} build)" }
                }
            }
        }
    }
}
