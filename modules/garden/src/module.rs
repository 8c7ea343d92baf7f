use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::GardenConfig;
use crate::contract::client::GardenApi;
use crate::domain::ports::IdentityVerifier;
use crate::domain::service::Service;
use crate::gateways::local::GardenLocalClient;
use crate::infra::identity::TokenInfoVerifier;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmGardenRepository;

/// The garden module: wires storage and the identity adapter to the domain
/// service and exposes it over REST and as an in-process client.
#[derive(Clone)]
pub struct Garden {
    service: Arc<Service>,
}

impl Garden {
    /// Apply pending schema migrations.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running garden database migrations");
        Migrator::up(conn, None).await?;
        info!("Garden database migrations completed successfully");
        Ok(())
    }

    /// Build the module with the HTTP identity verifier from config.
    pub fn new(conn: DatabaseConnection, cfg: &GardenConfig) -> anyhow::Result<Self> {
        let verifier = TokenInfoVerifier::from_config(&cfg.identity)?;
        Ok(Self::with_verifier(conn, cfg, Arc::new(verifier)))
    }

    pub fn with_verifier(
        conn: DatabaseConnection,
        cfg: &GardenConfig,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        debug!(
            "Loaded garden config: default_water_frequency={}, max_water_frequency={}",
            cfg.default_water_frequency, cfg.max_water_frequency
        );
        let repo = SeaOrmGardenRepository::new(conn);
        let service = Service::new(Arc::new(repo), verifier, cfg.service_config());
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client for other modules.
    pub fn client(&self) -> Arc<dyn GardenApi> {
        Arc::new(GardenLocalClient::new(self.service.clone()))
    }

    /// REST routes without the ingress middleware.
    pub fn router(&self) -> axum::Router {
        info!("Registering garden REST routes");
        routes::register_routes(axum::Router::new(), self.service.clone())
    }
}
