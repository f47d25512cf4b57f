//! Store and router context shared across the component tree.
//!
//! The [`Store`] owns its state behind a lock, so components cannot subscribe
//! to it directly. A `revision` signal is bumped after every dispatched
//! action; reading it through [`StoreContext::subscribe`] makes a component
//! re-render when the store changes.

use std::future::Future;
use std::sync::Arc;
use std::task::Poll;

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::platform::{Document, Storage};
use crate::router::{Navigation, RouteTable, Router as HistoryRouter};
use crate::store::{Store, StoreConfig};

#[derive(Clone, Copy)]
pub struct StoreContext {
    store: Signal<Store>,
    router: Signal<HistoryRouter>,
    revision: Signal<u64>,
}

impl StoreContext {
    /// Handle to the store; does not subscribe
    pub fn store(&self) -> Store {
        self.store.peek().clone()
    }

    /// Handle to the store, re-rendering the caller on every change
    pub fn subscribe(&self) -> Store {
        let _ = (self.revision)();
        self.store()
    }

    /// Notify subscribers that the store changed
    pub fn touch(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Run a synchronous action and notify subscribers
    pub fn update(&self, action: impl FnOnce(&Store)) {
        action(&self.store());
        self.touch();
    }

    /// Run an async action on the component scope.
    ///
    /// Subscribers are notified once the action's synchronous prefix has run
    /// (loading flags set) and again when it completes.
    pub fn dispatch<F, Fut>(&self, action: F)
    where
        F: FnOnce(Store) -> Fut + 'static,
        Fut: Future + 'static,
    {
        let ctx = *self;
        spawn(async move {
            let fut = action(ctx.store());
            futures::pin_mut!(fut);
            if let Poll::Ready(_) = futures::poll!(fut.as_mut()) {
                ctx.touch();
                return;
            }
            ctx.touch();
            fut.await;
            ctx.touch();
        });
    }

    /// Reconcile the history router with the location Dioxus rendered
    pub fn navigate_to(&self, path: &str) -> Option<Navigation> {
        let mut router = self.router;
        let navigation = router.write().sync(path);
        navigation
    }

    pub fn can_go_back(&self) -> bool {
        self.router.read().can_go_back()
    }
}

#[cfg(target_arch = "wasm32")]
fn platform_backends() -> (Arc<dyn Storage>, Arc<dyn Document>) {
    use crate::platform::{MemoryStorage, WebDocument, WebStorage};

    let storage: Arc<dyn Storage> = match WebStorage::open() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::warn!("localStorage unavailable, using memory storage: {}", e);
            Arc::new(MemoryStorage::new())
        }
    };
    (storage, Arc::new(WebDocument))
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_backends() -> (Arc<dyn Storage>, Arc<dyn Document>) {
    use crate::platform::{HeadlessDocument, MemoryStorage};

    (
        Arc::new(MemoryStorage::new()),
        Arc::new(HeadlessDocument::new()),
    )
}

fn build_store() -> Store {
    let config = AppConfig::default();
    #[allow(clippy::expect_used)] // Default base URL is a valid constant
    let api = ApiClient::new(&config.api).expect("default API config is valid");
    let (storage, document) = platform_backends();
    Store::new(api, storage, document, StoreConfig::from(&config))
}

/// Create the store context at the app root
pub fn use_store_provider() -> StoreContext {
    let store = use_signal(build_store);
    let router = use_signal(move || {
        let store = store.peek().clone();
        let session = store.clone();
        HistoryRouter::new(RouteTable::standard(), store.document())
            .with_auth(move || session.is_logged_in())
    });
    let revision = use_signal(|| 0u64);

    let ctx = use_context_provider(|| StoreContext {
        store,
        router,
        revision,
    });

    // Rehydrate once the DOM exists
    use_effect(move || {
        ctx.update(Store::init);
    });

    ctx
}

/// Get the store context from any component
pub fn use_store() -> StoreContext {
    use_context::<StoreContext>()
}
