//! Router navigation tests
//!
//! Exercises the history router against a headless document:
//! titles and descriptions per route, the catch-all, scroll behavior on
//! push and back/forward, and the login redirect wired to a real store.

use std::sync::Arc;
use std::time::Duration;

use spa_shell::api::ApiClient;
use spa_shell::config::ApiConfig;
use spa_shell::platform::{Document, HeadlessDocument, MemoryStorage, ScrollBehavior, ScrollPosition};
use spa_shell::router::{NavigationKind, RouteTable, Router, View};
use spa_shell::store::{Store, StoreConfig};

fn headless_router() -> (Router, Arc<HeadlessDocument>) {
    let document = Arc::new(HeadlessDocument::new());
    (Router::new(RouteTable::standard(), document.clone()), document)
}

#[test]
fn every_declared_route_sets_title_and_description() {
    let (mut router, document) = headless_router();

    for (path, title, description) in [
        (
            "/",
            "Home - Vue 3 SPA",
            "Welcome to Vue 3 Single Page Application showcasing modern web development",
        ),
        ("/profile", "Profile - Vue 3 SPA", "User profile and authentication"),
        ("/dashboard", "Dashboard - Vue 3 SPA", "User management and data dashboard"),
        ("/about", "About - Vue 3 SPA", "Learn more about this Vue 3 application"),
    ] {
        let nav = router.push(path);
        assert_ne!(nav.view, View::NotFound, "{}", path);
        assert_eq!(document.title(), title);
        assert_eq!(document.meta_description().as_deref(), Some(description));
    }
}

#[test]
fn unknown_path_renders_not_found() {
    let (mut router, document) = headless_router();

    let nav = router.push("/does/not/exist");

    assert_eq!(nav.view, View::NotFound);
    assert_eq!(nav.to, "NotFound");
    assert_eq!(nav.path, "/does/not/exist");
    assert_eq!(document.title(), "Page Not Found - Vue 3 SPA");
    assert_eq!(
        document.meta_description().as_deref(),
        Some("The requested page could not be found")
    );
}

#[test]
fn mixed_case_paths_resolve_to_declared_routes() {
    let (mut router, document) = headless_router();

    let nav = router.push("/About");
    assert_eq!(nav.to, "About");
    assert_eq!(nav.view, View::About);
    assert_eq!(document.title(), "About - Vue 3 SPA");

    let nav = router.push("/DASHBOARD");
    assert_eq!(nav.to, "Dashboard");
    assert_eq!(document.title(), "Dashboard - Vue 3 SPA");
    assert_eq!(
        document.meta_description().as_deref(),
        Some("User management and data dashboard")
    );
}

#[test]
fn missing_meta_tag_is_skipped() {
    let document = Arc::new(HeadlessDocument::without_meta_description());
    let mut router = Router::new(RouteTable::standard(), document.clone());

    router.push("/about");

    assert_eq!(document.title(), "About - Vue 3 SPA");
    assert_eq!(document.meta_description(), None);
}

#[test]
fn lazy_routes_load_on_first_visit() {
    let (mut router, _) = headless_router();
    let about_loaded = |r: &Router| r.table().by_name("About").is_some_and(|d| d.is_loaded());

    router.push("/");
    assert!(!about_loaded(&router));

    router.push("/about");
    assert!(about_loaded(&router));
}

#[test]
fn push_scrolls_smoothly_to_top() {
    let (mut router, document) = headless_router();
    router.push("/");
    document.user_scroll(ScrollPosition::new(0.0, 640.0));

    let nav = router.push("/dashboard");

    assert_eq!(nav.kind, NavigationKind::Push);
    assert_eq!(nav.scroll.position, ScrollPosition::TOP);
    assert_eq!(nav.scroll.behavior, ScrollBehavior::Smooth);
    assert_eq!(document.scroll_position(), ScrollPosition::TOP);
    assert_eq!(document.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
}

#[test]
fn back_and_forward_restore_saved_positions() {
    let (mut router, document) = headless_router();
    router.push("/");
    document.user_scroll(ScrollPosition::new(0.0, 320.0));
    router.push("/dashboard");
    document.user_scroll(ScrollPosition::new(12.0, 900.0));

    let back = router.back().expect("history has a previous entry");
    assert_eq!(back.kind, NavigationKind::Back);
    assert_eq!(back.to, "Home");
    assert_eq!(back.from, Some("Dashboard"));
    assert_eq!(back.scroll.position, ScrollPosition::new(0.0, 320.0));
    assert_eq!(document.scroll_position(), ScrollPosition::new(0.0, 320.0));
    assert_eq!(document.title(), "Home - Vue 3 SPA");

    let forward = router.forward().expect("history has a next entry");
    assert_eq!(forward.kind, NavigationKind::Forward);
    assert_eq!(forward.scroll.position, ScrollPosition::new(12.0, 900.0));
    assert_eq!(document.scroll_position(), ScrollPosition::new(12.0, 900.0));
    assert_eq!(document.title(), "Dashboard - Vue 3 SPA");
}

#[test]
fn sync_replays_browser_history() {
    let (mut router, document) = headless_router();
    router.sync("/");
    router.sync("/about");
    router.sync("/profile");

    let nav = router.sync("/about").expect("back to about");
    assert_eq!(nav.kind, NavigationKind::Back);
    assert_eq!(document.title(), "About - Vue 3 SPA");
    assert!(router.can_go_forward());
    assert_eq!(router.current().map(|e| e.name), Some("About"));
}

#[tokio::test]
async fn protected_route_follows_store_session() {
    let document = Arc::new(HeadlessDocument::new());
    // Nothing listens on port 9; no request is made here
    let api = ApiClient::new(&ApiConfig::with_base_url("http://127.0.0.1:9")).unwrap();
    let store = Store::new(
        api,
        Arc::new(MemoryStorage::new()),
        document.clone(),
        StoreConfig {
            login_delay: Duration::from_millis(1),
        },
    );

    let mut table = RouteTable::standard();
    assert!(table.protect("Dashboard"));
    assert!(!table.protect("Settings"));

    let session = store.clone();
    let mut router = Router::new(table, document.clone()).with_auth(move || session.is_logged_in());

    let nav = router.push("/dashboard");
    assert_eq!(nav.to, "Profile");
    assert_eq!(nav.redirected_from.as_deref(), Some("/dashboard"));

    store.login("jane@example.com", "pw").await;
    let nav = router.push("/dashboard");
    assert_eq!(nav.to, "Dashboard");
    assert_eq!(document.title(), "Dashboard - Vue 3 SPA");
}
