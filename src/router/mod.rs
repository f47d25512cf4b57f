//! Client-side router.
//!
//! Owns an in-memory history stack over the [`RouteTable`]. Every transition
//! runs the before-each guard (document title, meta description, auth
//! check), commits the history change, applies scroll behavior, and runs the
//! after-each hook (navigation log).
//!
//! ## Scroll behavior
//!
//! ```text
//! push          → scroll to top, smooth
//! back/forward  → restore the position saved when the entry was left
//! ```

use std::sync::Arc;

use crate::platform::{Document, ScrollBehavior, ScrollPosition};

pub mod routes;

pub use routes::{normalize_path, RouteDef, RouteMeta, RouteTable, View, CATCH_ALL};

/// Route that auth-protected routes redirect to
pub const LOGIN_ROUTE_PATH: &str = "/profile";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Back,
    Forward,
}

/// Where the page scrolled after a navigation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTarget {
    pub position: ScrollPosition,
    pub behavior: ScrollBehavior,
}

/// One completed transition
#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    /// `None` on the initial navigation
    pub from: Option<&'static str>,
    pub to: &'static str,
    pub path: String,
    pub view: View,
    pub kind: NavigationKind,
    pub scroll: ScrollTarget,
    /// Set when the auth check sent us somewhere other than requested
    pub redirected_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub name: &'static str,
    pub path: String,
    pub view: View,
    /// Position saved when this entry was navigated away from
    pub scroll: ScrollPosition,
}

enum GuardOutcome {
    Proceed,
    Redirect(&'static str),
}

pub type AuthCheck = Arc<dyn Fn() -> bool + Send + Sync>;

pub struct Router {
    table: RouteTable,
    document: Arc<dyn Document>,
    auth: Option<AuthCheck>,
    history: Vec<HistoryEntry>,
    index: usize,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("history", &self.history)
            .field("index", &self.index)
            .field("auth", &self.auth.is_some())
            .finish()
    }
}

impl Router {
    pub fn new(table: RouteTable, document: Arc<dyn Document>) -> Self {
        Self {
            table,
            document,
            auth: None,
            history: Vec::new(),
            index: 0,
        }
    }

    /// Install the logged-in check used for routes with `requires_auth`.
    /// Without one, such routes always redirect to the login route.
    pub fn with_auth<F>(mut self, is_logged_in: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.auth = Some(Arc::new(is_logged_in));
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.history.get(self.index)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty() && self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Navigate to `path`, discarding any forward history
    pub fn push(&mut self, path: &str) -> Navigation {
        self.push_inner(path, None)
    }

    fn push_inner(&mut self, path: &str, redirected_from: Option<String>) -> Navigation {
        let from = self.current().map(|e| e.name);

        if let GuardOutcome::Redirect(target) = self.before_each(path) {
            return self.push_inner(target, Some(path.to_string()));
        }

        // Lazy views load only once the guard lets the navigation through
        let (name, view) = {
            let route = self.table.resolve(path);
            (route.name, route.view())
        };

        self.save_scroll();
        if !self.history.is_empty() {
            self.history.truncate(self.index + 1);
        }
        self.history.push(HistoryEntry {
            name,
            path: path.to_string(),
            view,
            scroll: ScrollPosition::TOP,
        });
        self.index = self.history.len() - 1;

        let scroll = ScrollTarget {
            position: ScrollPosition::TOP,
            behavior: ScrollBehavior::Smooth,
        };
        self.document.scroll_to(scroll.position, scroll.behavior);

        let navigation = Navigation {
            from,
            to: name,
            path: path.to_string(),
            view,
            kind: NavigationKind::Push,
            scroll,
            redirected_from,
        };
        self.after_each(&navigation);
        navigation
    }

    /// Step back one entry. `None` at the start of history.
    pub fn back(&mut self) -> Option<Navigation> {
        if !self.can_go_back() {
            return None;
        }
        Some(self.traverse(self.index - 1, NavigationKind::Back))
    }

    /// Step forward one entry. `None` at the end of history.
    pub fn forward(&mut self) -> Option<Navigation> {
        if !self.can_go_forward() {
            return None;
        }
        Some(self.traverse(self.index + 1, NavigationKind::Forward))
    }

    /// Reconcile with an externally observed location change (browser
    /// history, rendered link). Adjacent history entries are treated as
    /// back/forward and the current path is a no-op, comparing without
    /// case. Anything else is a push.
    pub fn sync(&mut self, path: &str) -> Option<Navigation> {
        let target = normalize_path(path);
        let matches = |i: usize| {
            self.history
                .get(i)
                .is_some_and(|e| normalize_path(&e.path).eq_ignore_ascii_case(target))
        };

        let is_current = matches(self.index);
        let is_previous = self.index > 0 && matches(self.index - 1);
        let is_next = matches(self.index + 1);

        if is_current {
            None
        } else if is_previous {
            self.back()
        } else if is_next {
            self.forward()
        } else {
            Some(self.push(path))
        }
    }

    fn traverse(&mut self, target: usize, kind: NavigationKind) -> Navigation {
        let from = self.current().map(|e| e.name);
        let path = self.history[target].path.clone();

        if let GuardOutcome::Redirect(redirect) = self.before_each(&path) {
            return self.push_inner(redirect, Some(path));
        }

        self.save_scroll();
        self.index = target;
        let entry = &self.history[target];

        let scroll = ScrollTarget {
            position: entry.scroll,
            behavior: ScrollBehavior::Auto,
        };
        self.document.scroll_to(scroll.position, scroll.behavior);

        let navigation = Navigation {
            from,
            to: entry.name,
            path,
            view: entry.view,
            kind,
            scroll,
            redirected_from: None,
        };
        self.after_each(&navigation);
        navigation
    }

    fn save_scroll(&mut self) {
        let position = self.document.scroll_position();
        if let Some(entry) = self.history.get_mut(self.index) {
            entry.scroll = position;
        }
    }

    /// Document metadata, then the auth requirement
    fn before_each(&self, path: &str) -> GuardOutcome {
        let route = self.table.resolve(path);

        if !route.meta.title.is_empty() {
            self.document.set_title(route.meta.title);
        }
        if !route.meta.description.is_empty() {
            self.document.set_meta_description(route.meta.description);
        }

        if route.meta.requires_auth {
            let logged_in = self.auth.as_ref().is_some_and(|check| check());
            if !logged_in && route.path != LOGIN_ROUTE_PATH {
                tracing::info!("Route {} requires login, redirecting", route.name);
                return GuardOutcome::Redirect(LOGIN_ROUTE_PATH);
            }
        }

        GuardOutcome::Proceed
    }

    fn after_each(&self, navigation: &Navigation) {
        tracing::info!(
            "Navigated from {} to {}",
            navigation.from.unwrap_or("(start)"),
            navigation.to
        );
    }
}
