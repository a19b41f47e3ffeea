//! Module declaration and lifecycle implementation
//!
//! The host calls [`MaintenanceServiceModule::init`] (or
//! [`MaintenanceServiceModule::init_with_db`]) once, runs
//! [`MaintenanceServiceModule::migrate`] when storage is a database, and then
//! mounts the REST routes and the page gate.

use crate::api::native::NativeClient;
use crate::api::rest::middleware::PageGateState;
use crate::config::Config;
use crate::contract::MaintenanceApi;
use crate::domain::{ConfigurationProvider, EventPublisher, NoOpEventPublisher, Service};
use crate::infra::storage::repositories::SeaOrmConfigurationProvider;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Maintenance service module
pub struct MaintenanceServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for MaintenanceServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl MaintenanceServiceModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the domain service over `provider`
    pub fn init(
        &self,
        cfg: Config,
        provider: Arc<dyn ConfigurationProvider>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<()> {
        let service = Arc::new(Service::new(provider, event_publisher, &cfg)?);

        *self.config.write() = cfg;
        *self.service.write() = Some(service);

        tracing::info!("Maintenance service initialized");
        Ok(())
    }

    /// Build the domain service over the `maintenance_config` table
    pub fn init_with_db(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let provider = Arc::new(SeaOrmConfigurationProvider::new(db));

        // Build event publisher (NoOp for now, can be replaced with real implementation)
        let event_publisher = Arc::new(NoOpEventPublisher);

        self.init(cfg, provider, event_publisher)
    }

    /// Run database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Maintenance service migrations completed");
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn MaintenanceApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the maintenance REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering maintenance service REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }

    /// State for [`crate::api::rest::middleware::page_gate`]
    pub fn page_gate_state(&self) -> Result<PageGateState> {
        let www_root = self.config.read().www_root.clone();
        Ok(PageGateState::new(self.service()?, www_root))
    }
}
