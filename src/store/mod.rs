//! Centralized state container.
//!
//! [`Store`] is an explicitly constructed context object. It owns the state
//! and the collaborators actions need (API client, durable storage, document).
//! Clones share the same state, so one store can be handed to every consumer.
//!
//! Lifecycle: [`Store::new`] → [`Store::init`] (rehydrate session and theme)
//! → use → [`Store::teardown`] (reset in-memory state, storage untouched).
//!
//! Locking: state sits behind a `std::sync::RwLock`. Guards live only inside
//! the synchronous `read`/`commit` helpers and are never held across an
//! `.await`, so other actions may interleave between an action's steps.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::api::{ApiClient, ApiResult, NewPost, Post, User};
use crate::config::AppConfig;
use crate::platform::{self, Document, Storage};

pub mod mutations;
pub mod state;

pub use mutations::Mutation;
pub use state::{LoginPayload, Resource, ResourceMap, SessionUser, State, Theme};

/// Storage key for the persisted login record (JSON)
pub const USER_KEY: &str = "user";
/// Storage key for the persisted theme (plain string)
pub const THEME_KEY: &str = "theme";

/// Identity the login placeholder assigns to every session
const PLACEHOLDER_USER_ID: i64 = 1;
const PLACEHOLDER_USER_NAME: &str = "John Doe";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Delay standing in for credential verification during login
    pub login_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_secs(1),
        }
    }
}

impl From<&AppConfig> for StoreConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            login_delay: config.login_delay(),
        }
    }
}

/// Outcome of an action that produces no data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

struct StoreInner {
    state: RwLock<State>,
    api: ApiClient,
    storage: Arc<dyn Storage>,
    document: Arc<dyn Document>,
    config: StoreConfig,
}

#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("api", &self.inner.api)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Clears a resource's loading flag when dropped.
///
/// Runs on success, failure, panic, or the action future being dropped.
struct LoadingGuard<'a> {
    store: &'a Store,
    key: Resource,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.commit(Mutation::SetLoading {
            key: self.key,
            loading: false,
        });
    }
}

impl Store {
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn Storage>,
        document: Arc<dyn Document>,
        config: StoreConfig,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(State::default()),
                api,
                storage,
                document,
                config,
            }),
        }
    }

    /// Rehydrate session and theme from storage
    pub fn init(&self) {
        self.init_auth();
        self.init_theme();
        tracing::debug!(
            "Store initialized (logged_in={}, theme={})",
            self.is_logged_in(),
            self.current_theme().as_str()
        );
    }

    /// Reset in-memory state to defaults. Persisted values are left alone.
    pub fn teardown(&self) {
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *state = State::default();
        tracing::debug!("Store torn down");
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn document(&self) -> Arc<dyn Document> {
        self.inner.document.clone()
    }

    // ============ State access ============

    fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Apply one mutation
    pub fn commit(&self, mutation: Mutation) {
        tracing::debug!("commit {}", mutation.name());
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        mutations::apply(&mut state, mutation, self.inner.document.as_ref());
    }

    /// Clone of the full state
    pub fn snapshot(&self) -> State {
        self.read(State::clone)
    }

    // ============ Getters ============

    pub fn is_logged_in(&self) -> bool {
        self.read(State::is_logged_in)
    }

    pub fn current_user(&self) -> SessionUser {
        self.read(|s| s.current_user().clone())
    }

    pub fn user_name(&self) -> String {
        self.read(|s| s.user_name().to_string())
    }

    pub fn current_theme(&self) -> Theme {
        self.read(State::current_theme)
    }

    pub fn is_dark_theme(&self) -> bool {
        self.read(State::is_dark_theme)
    }

    pub fn is_loading(&self, key: Resource) -> bool {
        self.read(|s| s.is_loading(key))
    }

    pub fn is_any_loading(&self) -> bool {
        self.read(State::is_any_loading)
    }

    pub fn all_users(&self) -> Vec<User> {
        self.read(|s| s.all_users().to_vec())
    }

    pub fn user_by_id(&self, id: i64) -> Option<User> {
        self.read(|s| s.user_by_id(id).cloned())
    }

    pub fn all_posts(&self) -> Vec<Post> {
        self.read(|s| s.all_posts().to_vec())
    }

    pub fn posts_by_user_id(&self, user_id: i64) -> Vec<Post> {
        self.read(|s| s.posts_by_user_id(user_id).into_iter().cloned().collect())
    }

    pub fn error(&self, key: Resource) -> Option<String> {
        self.read(|s| s.error(key).map(str::to_string))
    }

    pub fn has_error(&self, key: Resource) -> bool {
        self.read(|s| s.has_error(key))
    }

    // ============ Actions ============

    /// Mark `key` as loading and clear its previous error.
    /// The flag is cleared again when the returned guard drops.
    fn begin(&self, key: Resource) -> LoadingGuard<'_> {
        self.commit(Mutation::SetLoading { key, loading: true });
        self.commit(Mutation::ClearError(key));
        LoadingGuard { store: self, key }
    }

    /// Log in.
    ///
    /// Placeholder authentication: waits the configured delay and always
    /// succeeds with a synthesized user. The password is not checked.
    /// Replace with a call to a real identity service.
    pub async fn login(&self, email: &str, _password: &str) -> ActionResult {
        let _loading = self.begin(Resource::Auth);

        platform::sleep(self.inner.config.login_delay).await;

        let payload = LoginPayload {
            id: PLACEHOLDER_USER_ID,
            name: PLACEHOLDER_USER_NAME.to_string(),
            email: email.to_string(),
        };
        self.commit(Mutation::SetUserLogin(payload.clone()));

        let persisted = serde_json::to_string(&payload)
            .map_err(platform::StorageError::from)
            .and_then(|json| self.inner.storage.set_item(USER_KEY, &json));

        match persisted {
            Ok(()) => {
                tracing::info!("Logged in as {}", email);
                ActionResult::ok()
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Failed to persist session: {}", message);
                self.commit(Mutation::SetError {
                    key: Resource::Auth,
                    error: Some(message.clone()),
                });
                ActionResult::failed(message)
            }
        }
    }

    pub fn logout(&self) {
        self.commit(Mutation::SetUserLogout);
        if let Err(e) = self.inner.storage.remove_item(USER_KEY) {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }
        tracing::info!("Logged out");
    }

    /// Restore a persisted session. Malformed records are discarded silently.
    pub fn init_auth(&self) {
        let raw = match self.inner.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {}", e);
                return;
            }
        };

        match serde_json::from_str::<LoginPayload>(&raw) {
            Ok(payload) => self.commit(Mutation::SetUserLogin(payload)),
            Err(e) => {
                tracing::debug!("Discarding malformed persisted session: {}", e);
                if let Err(e) = self.inner.storage.remove_item(USER_KEY) {
                    tracing::warn!("Failed to remove malformed session: {}", e);
                }
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.commit(Mutation::SetTheme(theme));
        self.persist_theme(theme);
    }

    pub fn toggle_theme(&self) {
        self.commit(Mutation::ToggleTheme);
        self.persist_theme(self.current_theme());
    }

    /// Apply the persisted theme, or light when none is stored
    pub fn init_theme(&self) {
        let theme = match self.inner.storage.get_item(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read persisted theme: {}", e);
                Theme::default()
            }
        };
        self.commit(Mutation::SetTheme(theme));
    }

    fn persist_theme(&self, theme: Theme) {
        if let Err(e) = self.inner.storage.set_item(THEME_KEY, theme.as_str()) {
            tracing::warn!("Failed to persist theme: {}", e);
        }
    }

    /// Replace `users` with the server list
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let _loading = self.begin(Resource::Users);

        let result = self.inner.api.fetch_users().await;
        match (&result.data, result.success) {
            (Some(users), true) => self.commit(Mutation::SetUsers(users.clone())),
            _ => self.record_error(Resource::Users, &result.error),
        }
        result
    }

    /// Fetch one user and merge it into `users` (replace by id, else append)
    pub async fn fetch_user(&self, id: i64) -> ApiResult<User> {
        let _loading = self.begin(Resource::Users);

        let result = self.inner.api.fetch_user(id).await;
        match (&result.data, result.success) {
            (Some(user), true) => self.commit(Mutation::UpsertUser(user.clone())),
            _ => self.record_error(Resource::Users, &result.error),
        }
        result
    }

    /// Replace `posts` with the server list, optionally filtered by author
    pub async fn fetch_posts(&self, user_id: Option<i64>) -> ApiResult<Vec<Post>> {
        let _loading = self.begin(Resource::Posts);

        let result = self.inner.api.fetch_posts(user_id).await;
        match (&result.data, result.success) {
            (Some(posts), true) => self.commit(Mutation::SetPosts(posts.clone())),
            _ => self.record_error(Resource::Posts, &result.error),
        }
        result
    }

    /// Create a post and prepend the server's copy to `posts`
    pub async fn create_post(&self, post: NewPost) -> ApiResult<Post> {
        let _loading = self.begin(Resource::Posts);

        let result = self.inner.api.create_post(&post).await;
        match (&result.data, result.success) {
            (Some(created), true) => self.commit(Mutation::AddPost(created.clone())),
            _ => self.record_error(Resource::Posts, &result.error),
        }
        result
    }

    fn record_error(&self, key: Resource, error: &Option<String>) {
        let message = error
            .clone()
            .unwrap_or_else(|| crate::api::middleware::NETWORK_ERROR.to_string());
        self.commit(Mutation::SetError {
            key,
            error: Some(message),
        });
    }
}
