//! Page components.

mod about;
mod dashboard;
mod home;
mod not_found;
mod profile;

pub use about::About;
pub use dashboard::Dashboard;
pub use home::Home;
pub use not_found::NotFound;
pub use profile::Profile;
