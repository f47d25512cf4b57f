//! The global document: title, meta description, theme attribute, scroll.

use std::sync::{Mutex, PoisonError};

/// Window scroll offset in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition {
        left: 0.0,
        top: 0.0,
    };

    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

pub trait Document: Send + Sync {
    fn set_title(&self, title: &str);

    /// Update `<meta name="description">`; no-op when the tag is absent
    fn set_meta_description(&self, content: &str);

    /// Set `data-theme` on the root element
    fn set_theme_attribute(&self, theme: &str);

    fn scroll_position(&self) -> ScrollPosition;

    fn scroll_to(&self, position: ScrollPosition, behavior: ScrollBehavior);
}

#[derive(Debug, Default)]
struct HeadlessState {
    title: String,
    meta_description: Option<String>,
    has_meta_description: bool,
    theme: Option<String>,
    scroll: ScrollPosition,
    last_scroll_behavior: Option<ScrollBehavior>,
}

/// In-memory document used natively and in tests.
///
/// Records every side effect so callers can assert on it.
#[derive(Debug)]
pub struct HeadlessDocument {
    state: Mutex<HeadlessState>,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HeadlessState {
                has_meta_description: true,
                ..HeadlessState::default()
            }),
        }
    }

    /// A document whose `<head>` has no description meta tag
    pub fn without_meta_description() -> Self {
        Self {
            state: Mutex::new(HeadlessState::default()),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut HeadlessState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn title(&self) -> String {
        self.with_state(|s| s.title.clone())
    }

    pub fn meta_description(&self) -> Option<String> {
        self.with_state(|s| s.meta_description.clone())
    }

    pub fn theme_attribute(&self) -> Option<String> {
        self.with_state(|s| s.theme.clone())
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.with_state(|s| s.last_scroll_behavior)
    }

    /// Simulate the user scrolling the page
    pub fn user_scroll(&self, position: ScrollPosition) {
        self.with_state(|s| s.scroll = position);
    }
}

impl Document for HeadlessDocument {
    fn set_title(&self, title: &str) {
        self.with_state(|s| s.title = title.to_string());
    }

    fn set_meta_description(&self, content: &str) {
        self.with_state(|s| {
            if s.has_meta_description {
                s.meta_description = Some(content.to_string());
            }
        });
    }

    fn set_theme_attribute(&self, theme: &str) {
        self.with_state(|s| s.theme = Some(theme.to_string()));
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.with_state(|s| s.scroll)
    }

    fn scroll_to(&self, position: ScrollPosition, behavior: ScrollBehavior) {
        self.with_state(|s| {
            s.scroll = position;
            s.last_scroll_behavior = Some(behavior);
        });
    }
}

/// Browser DOM via web-sys
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDocument;

#[cfg(target_arch = "wasm32")]
impl WebDocument {
    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }
}

#[cfg(target_arch = "wasm32")]
impl Document for WebDocument {
    fn set_title(&self, title: &str) {
        if let Some(document) = Self::document() {
            document.set_title(title);
        }
    }

    fn set_meta_description(&self, content: &str) {
        if let Some(document) = Self::document() {
            if let Ok(Some(meta)) = document.query_selector("meta[name=\"description\"]") {
                let _ = meta.set_attribute("content", content);
            }
        }
    }

    fn set_theme_attribute(&self, theme: &str) {
        if let Some(root) = Self::document().and_then(|d| d.document_element()) {
            let _ = root.set_attribute("data-theme", theme);
        }
    }

    fn scroll_position(&self) -> ScrollPosition {
        let Some(window) = web_sys::window() else {
            return ScrollPosition::TOP;
        };
        ScrollPosition {
            left: window.scroll_x().unwrap_or(0.0),
            top: window.scroll_y().unwrap_or(0.0),
        }
    }

    fn scroll_to(&self, position: ScrollPosition, behavior: ScrollBehavior) {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_left(position.left);
            options.set_top(position.top);
            options.set_behavior(match behavior {
                ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
                ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            });
            window.scroll_to_with_scroll_to_options(&options);
        }
    }
}
