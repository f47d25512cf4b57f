//! Store Probe CLI
//!
//! Drives the store and router headlessly against a live REST service.
//! Session and theme persist between runs in `$SPA_DATA_DIR/storage.json`.
//!
//! Usage:
//!   store-probe                 fetch users and all posts
//!   store-probe <user-id>       fetch users and that user's posts
//!   store-probe login <email>   log in, then fetch
//!   store-probe logout          clear the persisted session
//!   store-probe toggle-theme    flip and persist the theme
//!
//! Configuration: see `config::load_config` (SPA_API__BASE_URL etc).

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spa_shell::api::ApiClient;
use spa_shell::config;
use spa_shell::platform::{FileStorage, HeadlessDocument};
use spa_shell::router::{RouteTable, Router};
use spa_shell::store::{Resource, Store, StoreConfig};

enum Command {
    Fetch { user_id: Option<i64> },
    Login { email: String },
    Logout,
    ToggleTheme,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => Ok(Command::Fetch { user_id: None }),
        ["login", email] => Ok(Command::Login {
            email: email.to_string(),
        }),
        ["logout"] => Ok(Command::Logout),
        ["toggle-theme"] => Ok(Command::ToggleTheme),
        [id] => {
            let user_id = id
                .parse::<i64>()
                .with_context(|| format!("invalid user id: {}", id))?;
            Ok(Command::Fetch {
                user_id: Some(user_id),
            })
        }
        _ => bail!("usage: store-probe [<user-id> | login <email> | logout | toggle-theme]"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spa_shell=debug,store_probe=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = parse_args()?;

    let config = config::load_config()?;
    tracing::info!("Configuration loaded, API: {}", config.api.base_url);

    let storage = Arc::new(FileStorage::open(config::get_data_dir()));
    tracing::info!("Storage: {}", storage.path().display());
    let document = Arc::new(HeadlessDocument::new());

    let api = ApiClient::new(&config.api)?;
    let store = Store::new(api, storage, document.clone(), StoreConfig::from(&config));
    store.init();

    let session = store.clone();
    let mut router = Router::new(RouteTable::standard(), document.clone())
        .with_auth(move || session.is_logged_in());
    router.push("/");

    match command {
        Command::Logout => {
            store.logout();
            return Ok(());
        }
        Command::ToggleTheme => {
            store.toggle_theme();
            tracing::info!("Theme is now {}", store.current_theme().label());
            return Ok(());
        }
        Command::Login { email } => {
            router.push("/profile");
            let result = store.login(&email, "").await;
            if let Some(error) = result.error {
                tracing::warn!("Login finished with error: {}", error);
            }
            fetch(&store, &mut router, None).await;
        }
        Command::Fetch { user_id } => {
            fetch(&store, &mut router, user_id).await;
        }
    }

    router.push("/about");
    router.back();

    let state = store.snapshot();
    tracing::info!(
        "Session: {} (logged_in={}), theme: {}",
        state.user_name(),
        state.is_logged_in(),
        state.current_theme().as_str()
    );
    tracing::info!("Document title: {}", document.title());

    let failed: Vec<_> = Resource::ALL
        .into_iter()
        .filter_map(|key| state.error(key).map(|e| format!("{}: {}", key, e)))
        .collect();
    if !failed.is_empty() {
        bail!("requests failed ({})", failed.join(", "));
    }
    Ok(())
}

async fn fetch(store: &Store, router: &mut Router, user_id: Option<i64>) {
    router.push("/dashboard");

    let users = store.fetch_users().await;
    if users.success {
        tracing::info!("Fetched {} users", store.all_users().len());
    }

    let posts = store.fetch_posts(user_id).await;
    if posts.success {
        tracing::info!("Fetched {} posts", store.all_posts().len());
        for post in store.all_posts().iter().take(3) {
            tracing::info!("  #{} {}", post.id, post.title);
        }
    }
}
