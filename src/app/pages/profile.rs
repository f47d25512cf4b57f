//! Profile page: login form for guests, session details otherwise.

use dioxus::prelude::*;

use crate::app::components::{ErrorAlert, Layout};
use crate::app::store_context::use_store;
use crate::store::{Mutation, Resource};

#[component]
pub fn Profile() -> Element {
    let ctx = use_store();
    let store = ctx.subscribe();
    let user = store.current_user();
    let user_email = user.email.clone().unwrap_or_default();
    let user_id = user.id.map(|id| id.to_string()).unwrap_or_default();
    let loading = store.is_loading(Resource::Auth);
    let auth_error = store.error(Resource::Auth);

    // Form fields
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let e = email();
        let pw = password();

        if e.trim().is_empty() || pw.is_empty() {
            form_error.set(Some("Email and password are required".to_string()));
            return;
        }
        form_error.set(None);

        ctx.dispatch(move |store| async move {
            let result = store.login(e.trim(), &pw).await;
            if result.success {
                password.set(String::new());
            }
        });
    };

    let logout = move |_| {
        ctx.update(|store| store.logout());
        email.set(String::new());
    };

    let dismiss_auth_error = move |_: ()| {
        ctx.update(|store| store.commit(Mutation::ClearError(Resource::Auth)));
    };

    rsx! {
        Layout { nav_active: "profile".to_string(),
            h1 { "Profile" }

            if let Some(message) = auth_error {
                ErrorAlert { message, on_dismiss: dismiss_auth_error }
            }

            if user.logged_in {
                article {
                    header { strong { {user.name.clone()} } }
                    dl {
                        dt { "Email" }
                        dd { "{user_email}" }
                        dt { "User ID" }
                        dd { "{user_id}" }
                    }
                    footer {
                        button { class: "btn", onclick: logout, "Log out" }
                    }
                }
            } else {
                form { onsubmit: submit,
                    if let Some(message) = form_error() {
                        p { class: "text-error", "{message}" }
                    }
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        disabled: loading,
                        oninput: move |e| email.set(e.value()),
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{password}",
                        disabled: loading,
                        oninput: move |e| password.set(e.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading,
                        "aria-busy": if loading { "true" } else { "false" },
                        if loading { "Logging in..." } else { "Log in" }
                    }
                }
            }
        }
    }
}
