//! Dashboard page: users, posts, and a new-post form.
//!
//! All data flows through store actions; the page only keeps form state and
//! the selected author locally.

use dioxus::prelude::*;

use crate::api::NewPost;
use crate::app::components::{ErrorAlert, Layout};
use crate::app::store_context::use_store;
use crate::store::{Mutation, Resource};

/// Posts shown before "show all" is clicked
const POST_PREVIEW_LIMIT: usize = 10;

#[component]
pub fn Dashboard() -> Element {
    let ctx = use_store();
    let store = ctx.subscribe();

    let users: Vec<(i64, String, String, String)> = store
        .all_users()
        .into_iter()
        .map(|u| (u.id, u.name, u.username, u.email))
        .collect();
    let user_count = users.len();
    let users_loading = store.is_loading(Resource::Users);
    let posts_loading = store.is_loading(Resource::Posts);
    let users_error = store.error(Resource::Users);
    let posts_error = store.error(Resource::Posts);
    let author_id = store.current_user().id.unwrap_or(1);

    let mut selected_user = use_signal(|| None::<i64>);
    let mut show_all = use_signal(|| false);
    let mut title = use_signal(String::new);
    let mut body = use_signal(String::new);

    let posts = match selected_user() {
        Some(id) => store.posts_by_user_id(id),
        None => store.all_posts(),
    };
    let post_count = posts.len();
    let limit = if show_all() { post_count } else { POST_PREVIEW_LIMIT };
    let visible: Vec<(i64, String, String)> = posts
        .into_iter()
        .take(limit)
        .map(|p| (p.id, p.title, p.body))
        .collect();

    // Initial load
    use_hook(move || {
        if ctx.store().all_users().is_empty() {
            ctx.dispatch(|store| async move { store.fetch_users().await });
        }
        if ctx.store().all_posts().is_empty() {
            ctx.dispatch(|store| async move { store.fetch_posts(None).await });
        }
    });

    let reload_users = move |_| {
        ctx.dispatch(|store| async move { store.fetch_users().await });
    };

    let reload_posts = move |_| {
        let user_id = selected_user();
        ctx.dispatch(move |store| async move { store.fetch_posts(user_id).await });
    };

    let submit_post = move |evt: FormEvent| {
        evt.prevent_default();
        let t = title();
        let b = body();
        if t.trim().is_empty() {
            return;
        }
        let post = NewPost {
            user_id: author_id,
            title: t.trim().to_string(),
            body: b,
        };
        ctx.dispatch(move |store| async move {
            if store.create_post(post).await.success {
                title.set(String::new());
                body.set(String::new());
            }
        });
    };

    rsx! {
        Layout { nav_active: "dashboard".to_string(),
            h1 { "Dashboard" }

            // Users
            section {
                div { class: "flex justify-between items-center",
                    h2 { "Users ({user_count})" }
                    button {
                        class: "btn btn-sm",
                        disabled: users_loading,
                        onclick: reload_users,
                        if users_loading { "Loading..." } else { "Reload" }
                    }
                }
                if let Some(message) = users_error {
                    ErrorAlert {
                        message,
                        on_dismiss: move |_| ctx.update(|s| s.commit(Mutation::ClearError(Resource::Users))),
                    }
                }
                table {
                    thead {
                        tr {
                            th { "Name" }
                            th { "Username" }
                            th { "Email" }
                            th {}
                        }
                    }
                    tbody {
                        for (id, name, username, email) in users {
                            tr {
                                key: "{id}",
                                class: if selected_user() == Some(id) { "selected" } else { "" },
                                td { "{name}" }
                                td { "{username}" }
                                td { "{email}" }
                                td {
                                    button {
                                        class: "btn btn-ghost btn-sm",
                                        onclick: move |_| {
                                            if selected_user() == Some(id) {
                                                selected_user.set(None);
                                                ctx.dispatch(|store| async move { store.fetch_posts(None).await });
                                            } else {
                                                selected_user.set(Some(id));
                                                ctx.dispatch(move |store| async move {
                                                    store.fetch_posts(Some(id)).await
                                                });
                                            }
                                        },
                                        if selected_user() == Some(id) { "Clear filter" } else { "Posts" }
                                    }
                                    button {
                                        class: "btn btn-ghost btn-sm",
                                        onclick: move |_| {
                                            ctx.dispatch(move |store| async move { store.fetch_user(id).await });
                                        },
                                        "Refresh"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Posts
            section {
                div { class: "flex justify-between items-center",
                    h2 {
                        "Posts ({post_count})"
                        if let Some(id) = selected_user() {
                            small { class: "text-muted", " by user {id}" }
                        }
                    }
                    button {
                        class: "btn btn-sm",
                        disabled: posts_loading,
                        onclick: reload_posts,
                        if posts_loading { "Loading..." } else { "Reload" }
                    }
                }
                if let Some(message) = posts_error {
                    ErrorAlert {
                        message,
                        on_dismiss: move |_| ctx.update(|s| s.commit(Mutation::ClearError(Resource::Posts))),
                    }
                }
                form { onsubmit: submit_post,
                    input {
                        placeholder: "Title",
                        value: "{title}",
                        disabled: posts_loading,
                        oninput: move |e| title.set(e.value()),
                    }
                    textarea {
                        placeholder: "Write something...",
                        value: "{body}",
                        disabled: posts_loading,
                        oninput: move |e| body.set(e.value()),
                    }
                    button { class: "btn btn-primary", r#type: "submit", disabled: posts_loading, "Publish" }
                }
                for (id, post_title, post_body) in visible {
                    article { key: "{id}",
                        header { strong { "{post_title}" } }
                        p { "{post_body}" }
                    }
                }
                if post_count > POST_PREVIEW_LIMIT && !show_all() {
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| show_all.set(true),
                        "Show all {post_count} posts"
                    }
                }
            }
        }
    }
}
