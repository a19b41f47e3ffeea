//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to consult maintenance state.
//! NO HTTP - direct function calls for performance.

use super::{
    error::MaintenanceError,
    model::{
        BounceAction, BounceContext, MaintenanceConfig, MaintenanceStatus, NotificationPayload,
        NotificationScope,
    },
    remote::RemoteMaintenanceQuery,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Maintenance service API for inter-module communication
#[async_trait]
pub trait MaintenanceApi: Send + Sync {
    // ===== Configuration =====

    /// Current configuration, defaults when the tenant has none
    async fn get_config(&self, tenant_id: Uuid) -> Result<MaintenanceConfig, MaintenanceError>;

    /// Validate and store a configuration
    async fn set_config(
        &self,
        tenant_id: Uuid,
        config: MaintenanceConfig,
    ) -> Result<MaintenanceConfig, MaintenanceError>;

    // ===== Gating =====

    /// Whether `operation` may reach the remote platform right now
    async fn can_access(&self, tenant_id: Uuid, operation: &str)
        -> Result<bool, MaintenanceError>;

    /// How to divert a denied request
    async fn decide_bounce(
        &self,
        tenant_id: Uuid,
        context: &BounceContext,
    ) -> Result<BounceAction, MaintenanceError>;

    /// Maintenance notice, at most once per scope
    async fn notify(
        &self,
        tenant_id: Uuid,
        scope: &NotificationScope,
    ) -> Result<Option<NotificationPayload>, MaintenanceError>;

    /// Mode, activity and notice at the current time
    async fn status(&self, tenant_id: Uuid) -> Result<MaintenanceStatus, MaintenanceError>;

    // ===== Remote synchronization =====

    /// Adopt the remote platform's own maintenance mode; false when unsupported or failed
    async fn sync_from_remote(&self, tenant_id: Uuid, remote: &dyn RemoteMaintenanceQuery)
        -> bool;
}
