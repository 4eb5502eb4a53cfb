use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::upload::DEFAULT_MAX_UPLOAD_BYTES;

/// Configuration for the cards module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardsConfig {
    /// Base URL public card links and QR codes point at.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
            max_field_length: default_max_field_length(),
            max_array_len: default_max_array_len(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_max_field_length() -> usize {
    2048
}

fn default_max_array_len() -> usize {
    32
}

/// Local blob storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
    /// Prefix of public object URLs. Defaults to `{base_url}/storage`.
    #[serde(default)]
    pub public_base: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            public_base: None,
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn public_base_for(&self, base_url: &str) -> String {
        self.public_base
            .clone()
            .unwrap_or_else(|| format!("{}/storage", base_url.trim_end_matches('/')))
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("data/storage")
}

/// One account reachable through a fixed session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionAccount {
    pub token: String,
    pub account_id: Uuid,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionsConfig {
    #[serde(default)]
    pub accounts: Vec<SessionAccount>,
}
