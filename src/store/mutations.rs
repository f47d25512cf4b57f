//! Mutations: the only way state changes.
//!
//! Each variant is a synchronous, unconditional field update. Theme
//! mutations also mirror the new theme onto the document's `data-theme`.

use crate::api::{Post, User};
use crate::platform::Document;

use super::state::{LoginPayload, Resource, SessionUser, State, Theme};

#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    SetUserLogin(LoginPayload),
    SetUserLogout,
    SetTheme(Theme),
    ToggleTheme,
    SetLoading { key: Resource, loading: bool },
    SetUsers(Vec<User>),
    /// Append
    AddUser(User),
    /// Replace the user with the same id, else append
    UpsertUser(User),
    SetPosts(Vec<Post>),
    /// Prepend: newest post first
    AddPost(Post),
    SetError { key: Resource, error: Option<String> },
    ClearError(Resource),
    ClearAllErrors,
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetUserLogin(_) => "SET_USER_LOGIN",
            Mutation::SetUserLogout => "SET_USER_LOGOUT",
            Mutation::SetTheme(_) => "SET_THEME",
            Mutation::ToggleTheme => "TOGGLE_THEME",
            Mutation::SetLoading { .. } => "SET_LOADING",
            Mutation::SetUsers(_) => "SET_USERS",
            Mutation::AddUser(_) => "ADD_USER",
            Mutation::UpsertUser(_) => "UPSERT_USER",
            Mutation::SetPosts(_) => "SET_POSTS",
            Mutation::AddPost(_) => "ADD_POST",
            Mutation::SetError { .. } => "SET_ERROR",
            Mutation::ClearError(_) => "CLEAR_ERROR",
            Mutation::ClearAllErrors => "CLEAR_ALL_ERRORS",
        }
    }
}

pub fn apply(state: &mut State, mutation: Mutation, document: &dyn Document) {
    match mutation {
        Mutation::SetUserLogin(payload) => {
            state.user = SessionUser::from(payload);
        }
        Mutation::SetUserLogout => {
            state.user = SessionUser::default();
        }
        Mutation::SetTheme(theme) => {
            state.theme = theme;
            document.set_theme_attribute(theme.as_str());
        }
        Mutation::ToggleTheme => {
            state.theme = state.theme.toggled();
            document.set_theme_attribute(state.theme.as_str());
        }
        Mutation::SetLoading { key, loading } => {
            state.loading[key] = loading;
        }
        Mutation::SetUsers(users) => {
            state.users = users;
        }
        Mutation::AddUser(user) => {
            state.users.push(user);
        }
        Mutation::UpsertUser(user) => match state.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => state.users.push(user),
        },
        Mutation::SetPosts(posts) => {
            state.posts = posts;
        }
        Mutation::AddPost(post) => {
            state.posts.insert(0, post);
        }
        Mutation::SetError { key, error } => {
            state.errors[key] = error;
        }
        Mutation::ClearError(key) => {
            state.errors[key] = None;
        }
        Mutation::ClearAllErrors => {
            for key in Resource::ALL {
                state.errors[key] = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessDocument;

    fn post(id: i64) -> Post {
        Post {
            id,
            user_id: 1,
            ..Post::default()
        }
    }

    #[test]
    fn login_then_logout_restores_guest() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();

        apply(
            &mut state,
            Mutation::SetUserLogin(LoginPayload {
                id: 1,
                name: "John Doe".into(),
                email: "john@example.com".into(),
            }),
            &doc,
        );
        assert!(state.user.logged_in);
        assert_eq!(state.user.id, Some(1));

        apply(&mut state, Mutation::SetUserLogout, &doc);
        assert_eq!(state.user, SessionUser::default());
    }

    #[test]
    fn theme_mutations_mirror_document_attribute() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();

        apply(&mut state, Mutation::SetTheme(Theme::Dark), &doc);
        assert_eq!(doc.theme_attribute().as_deref(), Some("dark"));

        apply(&mut state, Mutation::ToggleTheme, &doc);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(doc.theme_attribute().as_deref(), Some("light"));
    }

    #[test]
    fn add_post_prepends_and_add_user_appends() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();

        apply(&mut state, Mutation::SetPosts(vec![post(1), post(2)]), &doc);
        apply(&mut state, Mutation::AddPost(post(101)), &doc);
        let ids: Vec<i64> = state.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![101, 1, 2]);

        apply(
            &mut state,
            Mutation::SetUsers(vec![User {
                id: 1,
                ..User::default()
            }]),
            &doc,
        );
        apply(
            &mut state,
            Mutation::AddUser(User {
                id: 2,
                ..User::default()
            }),
            &doc,
        );
        let ids: Vec<i64> = state.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn upsert_user_replaces_in_place_or_appends() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();
        let user = |id: i64, name: &str| User {
            id,
            name: name.into(),
            ..User::default()
        };

        apply(&mut state, Mutation::SetUsers(vec![user(1, "a"), user(2, "b")]), &doc);
        apply(&mut state, Mutation::UpsertUser(user(1, "renamed")), &doc);
        apply(&mut state, Mutation::UpsertUser(user(3, "c")), &doc);

        let names: Vec<(i64, &str)> = state.users.iter().map(|u| (u.id, u.name.as_str())).collect();
        assert_eq!(names, vec![(1, "renamed"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn clear_all_errors_empties_every_slot() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();
        for key in Resource::ALL {
            apply(
                &mut state,
                Mutation::SetError {
                    key,
                    error: Some("boom".into()),
                },
                &doc,
            );
        }
        apply(&mut state, Mutation::ClearError(Resource::Users), &doc);
        assert!(!state.has_error(Resource::Users));
        assert!(state.has_error(Resource::Posts));

        apply(&mut state, Mutation::ClearAllErrors, &doc);
        assert!(Resource::ALL.iter().all(|k| !state.has_error(*k)));
    }

    #[test]
    fn set_loading_touches_only_its_key() {
        let doc = HeadlessDocument::new();
        let mut state = State::default();
        apply(
            &mut state,
            Mutation::SetLoading {
                key: Resource::Auth,
                loading: true,
            },
            &doc,
        );
        assert!(state.is_loading(Resource::Auth));
        assert!(!state.is_loading(Resource::Users));
        assert!(!state.is_loading(Resource::Posts));
    }
}
