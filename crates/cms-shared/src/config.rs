//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_ADMIN_NAMESPACE_PREFIX, DEFAULT_DOCUMENT_SLUG_PARAM};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub navigation: NavigationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Route matching knobs for navigation highlighting.
#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    /// Any two routes sharing this prefix are treated as the same menu target.
    pub admin_namespace_prefix: String,
    pub document_slug_param: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            admin_namespace_prefix: DEFAULT_ADMIN_NAMESPACE_PREFIX.to_string(),
            document_slug_param: DEFAULT_DOCUMENT_SLUG_PARAM.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?.build()?.try_deserialize()
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "cms-server")?
            .set_default("storage.backend", "postgres")?
            .set_default("database.url", "postgres://localhost/cms")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("navigation.admin_namespace_prefix", DEFAULT_ADMIN_NAMESPACE_PREFIX)?
            .set_default("navigation.document_slug_param", DEFAULT_DOCUMENT_SLUG_PARAM)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true)))
    }
}
