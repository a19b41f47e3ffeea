//! Configuration provider trait for data access
//!
//! Implementations are in infra/storage.

use crate::contract::MaintenanceConfig;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Source of per-tenant maintenance configuration
#[async_trait]
pub trait ConfigurationProvider: Send + Sync {
    /// Stored configuration, `None` when the tenant has never been configured
    async fn get(&self, tenant_id: Uuid) -> Result<Option<MaintenanceConfig>>;

    /// Store a configuration (last write wins)
    async fn set(&self, tenant_id: Uuid, config: &MaintenanceConfig) -> Result<()>;
}
