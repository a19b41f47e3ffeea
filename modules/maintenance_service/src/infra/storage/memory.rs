//! In-memory configuration provider

use crate::contract::MaintenanceConfig;
use crate::domain::repository::ConfigurationProvider;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Process-local provider for tests and embedded deployments
#[derive(Clone, Default)]
pub struct InMemoryConfigurationProvider {
    data: Arc<RwLock<HashMap<Uuid, MaintenanceConfig>>>,
}

impl InMemoryConfigurationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider seeded with one tenant's configuration
    pub fn with_config(self, tenant_id: Uuid, config: MaintenanceConfig) -> Self {
        self.data.write().insert(tenant_id, config);
        self
    }
}

#[async_trait]
impl ConfigurationProvider for InMemoryConfigurationProvider {
    async fn get(&self, tenant_id: Uuid) -> Result<Option<MaintenanceConfig>> {
        Ok(self.data.read().get(&tenant_id).cloned())
    }

    async fn set(&self, tenant_id: Uuid, config: &MaintenanceConfig) -> Result<()> {
        self.data.write().insert(tenant_id, config.clone());
        Ok(())
    }
}
