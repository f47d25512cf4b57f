//! Dioxus application shell.
//!
//! The root component installs the store context and mounts the Dioxus
//! router. Pages read state through the store's getters and change it only
//! by dispatching store actions.

use dioxus::prelude::*;

pub mod components;
pub mod pages;
pub mod store_context;

use pages::{About, Dashboard, Home, NotFound, Profile};
use store_context::use_store_provider;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Store + history router context at app root (one store for all pages)
    use_store_provider();

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes. Mirrors the history router's table.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/profile")]
    Profile {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/about")]
    About {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
