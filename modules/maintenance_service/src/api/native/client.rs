//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    BounceAction, BounceContext, MaintenanceApi, MaintenanceConfig, MaintenanceError,
    MaintenanceStatus, NotificationPayload, NotificationScope, RemoteMaintenanceQuery,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by modules that talk to the remote platform from the same process.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MaintenanceApi for NativeClient {
    async fn get_config(&self, tenant_id: Uuid) -> Result<MaintenanceConfig, MaintenanceError> {
        self.service.get_config(tenant_id).await
    }

    async fn set_config(
        &self,
        tenant_id: Uuid,
        config: MaintenanceConfig,
    ) -> Result<MaintenanceConfig, MaintenanceError> {
        self.service.set_config(tenant_id, config).await
    }

    async fn can_access(
        &self,
        tenant_id: Uuid,
        operation: &str,
    ) -> Result<bool, MaintenanceError> {
        self.service.can_access(tenant_id, operation).await
    }

    async fn decide_bounce(
        &self,
        tenant_id: Uuid,
        context: &BounceContext,
    ) -> Result<BounceAction, MaintenanceError> {
        self.service.decide_bounce(tenant_id, context).await
    }

    async fn notify(
        &self,
        tenant_id: Uuid,
        scope: &NotificationScope,
    ) -> Result<Option<NotificationPayload>, MaintenanceError> {
        self.service.notify(tenant_id, scope).await
    }

    async fn status(&self, tenant_id: Uuid) -> Result<MaintenanceStatus, MaintenanceError> {
        self.service.status(tenant_id).await
    }

    async fn sync_from_remote(
        &self,
        tenant_id: Uuid,
        remote: &dyn RemoteMaintenanceQuery,
    ) -> bool {
        self.service.sync_from_remote(tenant_id, remote).await
    }
}
