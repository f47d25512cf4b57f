//! Light/dark toggle.

use dioxus::prelude::*;

use crate::app::store_context::use_store;

#[component]
pub fn ThemeSwitcher() -> Element {
    let ctx = use_store();
    let store = ctx.subscribe();
    let dark = store.is_dark_theme();
    let next = store.current_theme().toggled();

    rsx! {
        button {
            class: "btn btn-ghost btn-sm",
            title: "Switch to {next.label()} theme",
            onclick: move |_| ctx.update(|store| store.toggle_theme()),
            if dark { "☀ {next.label()}" } else { "☾ {next.label()}" }
        }
    }
}
