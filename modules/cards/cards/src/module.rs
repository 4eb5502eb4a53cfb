//! Module wiring for the cards module.

use std::path::PathBuf;
use std::sync::Arc;

use cards_sdk::CardsApi;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes::{RouterDeps, router};
use crate::config::{CardsConfig, SessionsConfig, StorageConfig};
use crate::domain::ports::SessionStore;
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::upload::UploadPolicy;
use crate::domain::validation::FormLimits;
use crate::infra::blob::LocalBlobStore;
use crate::infra::session::StaticSessionStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmCardsRepository;
use crate::local_client::LocalClient;

/// Everything `init` hands to the REST layer.
struct Wiring {
    service: Arc<Service>,
    sessions: Arc<dyn SessionStore>,
    storage_root: PathBuf,
}

/// Cards module.
///
/// Owns the card service and exposes it as a [`CardsApi`] client and as an
/// axum router with the HTML pages and the `/cards/v1` JSON API.
pub struct CardsModule {
    wiring: arc_swap::ArcSwapOption<Wiring>,
}

impl Default for CardsModule {
    fn default() -> Self {
        Self {
            wiring: arc_swap::ArcSwapOption::from(None),
        }
    }
}

impl CardsModule {
    /// Applies pending schema migrations.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running cards migrations");
        Migrator::up(db, None).await?;
        Ok(())
    }

    pub async fn init(
        &self,
        db: DatabaseConnection,
        cfg: &CardsConfig,
        storage: &StorageConfig,
        sessions: &SessionsConfig,
    ) -> anyhow::Result<()> {
        info!("Initializing cards module");
        debug!(
            base_url = %cfg.base_url,
            max_upload_bytes = cfg.max_upload_bytes,
            storage_root = %storage.root.display(),
            "Loaded cards config"
        );

        Self::migrate(&db).await?;

        let store = Arc::new(StaticSessionStore::new(&sessions.accounts));
        let blobs = Arc::new(LocalBlobStore::new(
            storage.root.clone(),
            storage.public_base_for(&cfg.base_url),
        ));
        let repo = Arc::new(SeaOrmCardsRepository::new(db));
        let service = Arc::new(Service::new(
            repo,
            store.clone(),
            blobs,
            ServiceConfig {
                base_url: cfg.base_url.clone(),
                limits: FormLimits {
                    max_field_length: cfg.max_field_length,
                    max_array_len: cfg.max_array_len,
                },
                upload: UploadPolicy {
                    max_bytes: cfg.max_upload_bytes,
                },
            },
        ));

        self.wiring.store(Some(Arc::new(Wiring {
            service,
            sessions: store,
            storage_root: storage.root.clone(),
        })));

        info!("Cards module initialized");
        Ok(())
    }

    fn wiring(&self) -> anyhow::Result<Arc<Wiring>> {
        self.wiring
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules.
    pub fn client(&self) -> anyhow::Result<Arc<dyn CardsApi>> {
        Ok(Arc::new(LocalClient::new(self.wiring()?.service.clone())))
    }

    pub fn router(&self) -> anyhow::Result<axum::Router> {
        let wiring = self.wiring()?;
        info!("Registering cards routes");
        Ok(router(RouterDeps {
            service: wiring.service.clone(),
            sessions: wiring.sessions.clone(),
            storage_root: wiring.storage_root.clone(),
        }))
    }
}
