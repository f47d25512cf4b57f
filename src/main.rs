//! SPA Shell - browser entry point.
//!
//! Built with `dx build --features web`; mounts the Dioxus app.

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting SPA Shell v{}", env!("SPA_VERSION"));
    dioxus::launch(spa_shell::app::App);
}
