//! Configuration management

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default REST service address
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LOGIN_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    /// Simulated credential check delay used by the store's login action
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }
}

impl AppConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    /// Config pointing at an arbitrary base URL (mock servers, staging)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Get config directory (SPA_CONFIG_DIR or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SPA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/spa-shell");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("spa-shell");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config/spa-shell");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("spa-shell");
        }
    }

    PathBuf::from(".")
}

/// Get data directory (SPA_DATA_DIR or platform default).
/// Native storage backend keeps its JSON file here.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SPA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/spa-shell");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("spa-shell");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/share/spa-shell");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(appdata).join("spa-shell");
        }
    }

    PathBuf::from("./data")
}

/// Load configuration: defaults, then `<config_dir>/config.*`, then `SPA_*` env vars.
///
/// Nested keys use a double underscore: `SPA_API__BASE_URL`, `SPA_API__TIMEOUT_MS`.
#[cfg(feature = "native")]
pub fn load_config() -> anyhow::Result<AppConfig> {
    let config_dir = get_config_dir();

    let builder = ::config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_ms", DEFAULT_TIMEOUT_MS as i64)?
        .set_default("login_delay_ms", DEFAULT_LOGIN_DELAY_MS as i64)?
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        .add_source(
            ::config::Environment::with_prefix("SPA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
