//! Store state and its pure getters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::api::{Post, User};

/// Theme options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values fall back to light
    pub fn parse(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Resources that own a loading flag and an error slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Posts,
    Auth,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Users, Resource::Posts, Resource::Auth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Posts => "posts",
            Resource::Auth => "auth",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Resource::Users),
            "posts" => Some(Resource::Posts),
            "auth" => Some(Resource::Auth),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot per [`Resource`]; lookups are an exhaustive match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMap<T> {
    pub users: T,
    pub posts: T,
    pub auth: T,
}

impl<T> ResourceMap<T> {
    pub fn get(&self, key: Resource) -> &T {
        match key {
            Resource::Users => &self.users,
            Resource::Posts => &self.posts,
            Resource::Auth => &self.auth,
        }
    }

    pub fn get_mut(&mut self, key: Resource) -> &mut T {
        match key {
            Resource::Users => &mut self.users,
            Resource::Posts => &mut self.posts,
            Resource::Auth => &mut self.auth,
        }
    }

    pub fn set(&mut self, key: Resource, value: T) {
        *self.get_mut(key) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, &T)> {
        Resource::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl<T> Index<Resource> for ResourceMap<T> {
    type Output = T;

    fn index(&self, key: Resource) -> &T {
        self.get(key)
    }
}

impl<T> IndexMut<Resource> for ResourceMap<T> {
    fn index_mut(&mut self, key: Resource) -> &mut T {
        self.get_mut(key)
    }
}

/// Record written by login and persisted under the `user` storage key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Current session user. The default is the guest record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub logged_in: bool,
    pub name: String,
    pub email: Option<String>,
    pub id: Option<i64>,
}

pub const GUEST_NAME: &str = "Guest";

impl Default for SessionUser {
    fn default() -> Self {
        Self {
            logged_in: false,
            name: GUEST_NAME.to_string(),
            email: None,
            id: None,
        }
    }
}

impl From<LoginPayload> for SessionUser {
    fn from(payload: LoginPayload) -> Self {
        Self {
            logged_in: true,
            name: payload.name,
            email: Some(payload.email),
            id: Some(payload.id),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct State {
    pub user: SessionUser,
    pub theme: Theme,
    pub loading: ResourceMap<bool>,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub errors: ResourceMap<Option<String>>,
}

impl State {
    pub fn is_logged_in(&self) -> bool {
        self.user.logged_in
    }

    pub fn current_user(&self) -> &SessionUser {
        &self.user
    }

    pub fn user_name(&self) -> &str {
        &self.user.name
    }

    pub fn current_theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn is_loading(&self, key: Resource) -> bool {
        self.loading[key]
    }

    pub fn is_any_loading(&self) -> bool {
        self.loading.iter().any(|(_, loading)| *loading)
    }

    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    pub fn user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_by_user_id(&self, user_id: i64) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.user_id == user_id).collect()
    }

    pub fn error(&self, key: Resource) -> Option<&str> {
        self.errors[key].as_deref()
    }

    pub fn has_error(&self, key: Resource) -> bool {
        self.errors[key].is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, user_id: i64) -> Post {
        Post {
            id,
            user_id,
            title: format!("post {}", id),
            ..Post::default()
        }
    }

    #[test]
    fn default_state_is_guest_light_idle() {
        let state = State::default();
        assert!(!state.is_logged_in());
        assert_eq!(state.user_name(), "Guest");
        assert_eq!(state.current_theme(), Theme::Light);
        assert!(!state.is_any_loading());
        for key in Resource::ALL {
            assert!(!state.is_loading(key));
            assert!(!state.has_error(key));
        }
    }

    #[test]
    fn theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.as_str(), "dark");
    }

    #[test]
    fn resource_keys_round_trip() {
        for key in Resource::ALL {
            assert_eq!(Resource::parse(key.as_str()), Some(key));
        }
        assert_eq!(Resource::parse("comments"), None);
    }

    #[test]
    fn any_loading_reflects_single_flag() {
        let mut state = State::default();
        state.loading[Resource::Posts] = true;
        assert!(state.is_any_loading());
        assert!(state.is_loading(Resource::Posts));
        assert!(!state.is_loading(Resource::Users));
    }

    #[test]
    fn posts_filtered_by_user_keep_order() {
        let mut state = State::default();
        state.posts = vec![post(3, 1), post(2, 2), post(1, 1)];

        let ids: Vec<i64> = state.posts_by_user_id(1).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(state.posts_by_user_id(9).is_empty());
    }

    #[test]
    fn user_lookup_by_id() {
        let mut state = State::default();
        state.users = vec![
            User {
                id: 1,
                name: "Leanne".into(),
                ..User::default()
            },
            User {
                id: 2,
                name: "Ervin".into(),
                ..User::default()
            },
        ];
        assert_eq!(state.user_by_id(2).map(|u| u.name.as_str()), Some("Ervin"));
        assert!(state.user_by_id(5).is_none());
    }

    #[test]
    fn session_user_json_uses_camel_case() {
        let user = SessionUser::from(LoginPayload {
            id: 1,
            name: "John Doe".into(),
            email: "john@example.com".into(),
        });
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["loggedIn"], true);
        assert_eq!(json["email"], "john@example.com");
    }
}
