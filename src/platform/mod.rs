//! Host environment abstractions.
//!
//! The store and router only see two collaborators: durable key/value
//! [`Storage`] and the global [`Document`]. On wasm32 these are backed by
//! `localStorage` and the DOM; natively by a JSON file or memory and a
//! headless recorder.

use std::time::Duration;

pub mod document;
pub mod storage;

pub use document::{Document, HeadlessDocument, ScrollBehavior, ScrollPosition};
pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use document::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use storage::WebStorage;

/// Suspend the current task for `duration`.
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspend the current task for `duration` (browser `setTimeout`).
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;

    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Native build without a runtime: delays are skipped.
#[cfg(all(not(target_arch = "wasm32"), not(feature = "native")))]
pub async fn sleep(duration: Duration) {
    tracing::debug!("No timer available, skipping {:?} delay", duration);
}
