//! Reusable UI components.

mod error_alert;
mod layout;
mod nav;
mod theme_switcher;

pub use error_alert::ErrorAlert;
pub use layout::Layout;
pub use nav::Nav;
pub use theme_switcher::ThemeSwitcher;
