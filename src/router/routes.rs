//! Static route table.

use std::sync::OnceLock;

/// Path pattern of the catch-all route
pub const CATCH_ALL: &str = "/:pathMatch(.*)*";

/// Page views the router can render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Profile,
    Dashboard,
    About,
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub description: &'static str,
    /// Declared per route; every standard route sets it to false
    pub requires_auth: bool,
}

enum ViewSlot {
    Eager(View),
    Lazy {
        loader: fn() -> View,
        resolved: OnceLock<View>,
    },
}

pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
    slot: ViewSlot,
}

impl std::fmt::Debug for RouteDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDef")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("lazy", &self.is_lazy())
            .finish()
    }
}

impl RouteDef {
    pub fn eager(path: &'static str, name: &'static str, view: View, meta: RouteMeta) -> Self {
        Self {
            path,
            name,
            meta,
            slot: ViewSlot::Eager(view),
        }
    }

    /// Route whose view is resolved on first navigation and cached afterwards
    pub fn lazy(
        path: &'static str,
        name: &'static str,
        loader: fn() -> View,
        meta: RouteMeta,
    ) -> Self {
        Self {
            path,
            name,
            meta,
            slot: ViewSlot::Lazy {
                loader,
                resolved: OnceLock::new(),
            },
        }
    }

    pub fn view(&self) -> View {
        match &self.slot {
            ViewSlot::Eager(view) => *view,
            ViewSlot::Lazy { loader, resolved } => *resolved.get_or_init(|| {
                tracing::debug!("Loading view for route {}", self.name);
                loader()
            }),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.slot, ViewSlot::Lazy { .. })
    }

    /// False only for a lazy route that has never been navigated to
    pub fn is_loaded(&self) -> bool {
        match &self.slot {
            ViewSlot::Eager(_) => true,
            ViewSlot::Lazy { resolved, .. } => resolved.get().is_some(),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.path == CATCH_ALL
    }
}

fn load_about() -> View {
    View::About
}

fn load_not_found() -> View {
    View::NotFound
}

/// Ordered route list; the last entry is the catch-all
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    pub fn standard() -> Self {
        Self {
            routes: vec![
                RouteDef::eager(
                    "/",
                    "Home",
                    View::Home,
                    RouteMeta {
                        title: "Home - Vue 3 SPA",
                        description: "Welcome to Vue 3 Single Page Application showcasing modern web development",
                        requires_auth: false,
                    },
                ),
                RouteDef::eager(
                    "/profile",
                    "Profile",
                    View::Profile,
                    RouteMeta {
                        title: "Profile - Vue 3 SPA",
                        description: "User profile and authentication",
                        // Profile handles its own logged-out state
                        requires_auth: false,
                    },
                ),
                RouteDef::eager(
                    "/dashboard",
                    "Dashboard",
                    View::Dashboard,
                    RouteMeta {
                        title: "Dashboard - Vue 3 SPA",
                        description: "User management and data dashboard",
                        requires_auth: false,
                    },
                ),
                RouteDef::lazy(
                    "/about",
                    "About",
                    load_about,
                    RouteMeta {
                        title: "About - Vue 3 SPA",
                        description: "Learn more about this Vue 3 application",
                        requires_auth: false,
                    },
                ),
                RouteDef::lazy(
                    CATCH_ALL,
                    "NotFound",
                    load_not_found,
                    RouteMeta {
                        title: "Page Not Found - Vue 3 SPA",
                        description: "The requested page could not be found",
                        requires_auth: false,
                    },
                ),
            ],
        }
    }

    /// Match `path` case-insensitively (query, fragment, and trailing slash
    /// ignored). Falls back to the catch-all route.
    pub fn resolve(&self, path: &str) -> &RouteDef {
        let normalized = normalize_path(path);
        self.routes
            .iter()
            .find(|r| !r.is_catch_all() && r.path.eq_ignore_ascii_case(normalized))
            .unwrap_or_else(|| self.not_found())
    }

    /// Mark a route as requiring login. Returns false for unknown names.
    pub fn protect(&mut self, name: &str) -> bool {
        match self.routes.iter_mut().find(|r| r.name == name) {
            Some(route) => {
                route.meta.requires_auth = true;
                true
            }
            None => false,
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn not_found(&self) -> &RouteDef {
        // standard() always ends with the catch-all
        let last = self.routes.len() - 1;
        &self.routes[last]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDef> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip query string, fragment, and trailing slash (root stays `/`)
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_routes_two_lazy() {
        let table = RouteTable::standard();
        assert_eq!(table.len(), 5);
        let lazy: Vec<&str> = table.iter().filter(|r| r.is_lazy()).map(|r| r.name).collect();
        assert_eq!(lazy, vec!["About", "NotFound"]);
        assert!(table.iter().all(|r| !r.meta.requires_auth));
    }

    #[test]
    fn resolves_declared_paths() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/").name, "Home");
        assert_eq!(table.resolve("/profile").view(), View::Profile);
        assert_eq!(table.resolve("/dashboard/").name, "Dashboard");
        assert_eq!(table.resolve("/about?ref=nav#team").name, "About");
    }

    #[test]
    fn matching_ignores_case() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/About").name, "About");
        assert_eq!(table.resolve("/DASHBOARD").name, "Dashboard");
        assert_eq!(table.resolve("/Profile/?tab=1").name, "Profile");
        assert_eq!(table.resolve("/Nope").name, "NotFound");
    }

    #[test]
    fn unknown_paths_hit_catch_all() {
        let table = RouteTable::standard();
        for path in ["/nope", "/profile/settings", "/users/1", ""] {
            let route = table.resolve(path);
            if path.is_empty() {
                assert_eq!(route.name, "Home");
            } else {
                assert_eq!(route.view(), View::NotFound, "path {}", path);
            }
        }
    }

    #[test]
    fn lazy_view_resolves_once() {
        let table = RouteTable::standard();
        let about = table.by_name("About").unwrap();
        assert!(!about.is_loaded());
        assert_eq!(about.view(), View::About);
        assert!(about.is_loaded());
    }

    #[test]
    fn normalize_path_variants() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/about/"), "/about");
        assert_eq!(normalize_path("/about?x=1"), "/about");
        assert_eq!(normalize_path("/#top"), "/");
    }
}
