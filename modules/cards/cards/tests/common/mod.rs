#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures: in-memory SQLite, migrated schema, temp blob root and
//! two configured session accounts.

use cards::CardsModule;
use cards::config::{CardsConfig, SessionAccount, SessionsConfig, StorageConfig};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;
use uuid::Uuid;

pub const ADA_TOKEN: &str = "t-ada";
pub const BOB_TOKEN: &str = "t-bob";
pub const BASE_URL: &str = "https://cards.example";

pub fn ada_id() -> Uuid {
    Uuid::from_u128(0xada)
}

pub fn bob_id() -> Uuid {
    Uuid::from_u128(0xb0b)
}

pub async fn connect() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    CardsModule::migrate(&db).await.unwrap();
    db
}

pub fn sessions() -> SessionsConfig {
    SessionsConfig {
        accounts: vec![
            SessionAccount {
                token: ADA_TOKEN.to_owned(),
                account_id: ada_id(),
                username: "ada".to_owned(),
                email: Some("ada@example.com".to_owned()),
                full_name: Some("Ada Lovelace".to_owned()),
            },
            SessionAccount {
                token: BOB_TOKEN.to_owned(),
                account_id: bob_id(),
                username: "bob".to_owned(),
                email: None,
                full_name: None,
            },
        ],
    }
}

pub struct Harness {
    pub module: CardsModule,
    pub storage: TempDir,
}

pub async fn harness() -> Harness {
    let storage = TempDir::new().unwrap();
    let module = CardsModule::default();
    let cfg = CardsConfig {
        base_url: BASE_URL.to_owned(),
        ..CardsConfig::default()
    };
    let storage_cfg = StorageConfig {
        root: storage.path().to_path_buf(),
        public_base: None,
    };
    module
        .init(connect().await, &cfg, &storage_cfg, &sessions())
        .await
        .unwrap();
    Harness { module, storage }
}
