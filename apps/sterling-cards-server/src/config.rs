//! Layered server configuration.

use std::path::Path;

use anyhow::Context;
use cards::config::{CardsConfig, SessionsConfig, StorageConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Single-variable override for `cards.base_url`.
pub const BASE_URL_ENV: &str = "STERLING_BASE_URL";
/// Prefix of nested overrides, e.g. `STERLING__SERVER__PORT`.
pub const ENV_PREFIX: &str = "STERLING__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cards: CardsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// e.g. `sqlite::memory:` or `sqlite://data/cards.db?mode=rwc`
    #[serde(default = "default_dsn")]
    pub dsn: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { dsn: default_dsn() }
    }
}

fn default_dsn() -> String {
    "sqlite::memory:".to_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

impl AppConfig {
    /// defaults -> YAML (if provided) -> `STERLING__*` env -> `STERLING_BASE_URL`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            figment = figment.merge(Serialized::default("cards.base_url", base_url));
        }
        figment.extract().context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8, mock: bool) {
        if let Some(port) = port {
            self.server.port = port;
        }
        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        if mock {
            self.database.dsn = default_dsn();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base = url::Url::parse(&self.cards.base_url)
            .with_context(|| format!("cards.base_url '{}' is not a URL", self.cards.base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("cards.base_url must use http or https");
        }
        if self.cards.max_upload_bytes == 0 {
            anyhow::bail!("cards.max_upload_bytes must be positive");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
