//! Domain service - business logic orchestration

use super::bounce::BounceStrategy;
use super::clock::{Clock, SystemClock};
use super::controller::{ControllerOptions, MaintenanceController};
use super::events::{EventPublisher, MaintenanceEvent};
use super::repository::ConfigurationProvider;
use super::validation::validate_config;
use crate::config::Config;
use crate::contract::{
    BounceAction, BounceContext, MaintenanceConfig, MaintenanceError, MaintenanceStatus,
    NotificationPayload, NotificationScope, RemoteMaintenanceQuery,
};
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for tenant maintenance state
pub struct Service {
    provider: Arc<dyn ConfigurationProvider>,
    event_publisher: Arc<dyn EventPublisher>,
    strategy: Arc<BounceStrategy>,
    clock: Arc<dyn Clock>,
    options: Arc<ControllerOptions>,
    max_message_length: usize,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        provider: Arc<dyn ConfigurationProvider>,
        event_publisher: Arc<dyn EventPublisher>,
        config: &Config,
    ) -> Result<Self, MaintenanceError> {
        Ok(Self {
            provider,
            event_publisher,
            strategy: Arc::new(BounceStrategy::from_config(config)),
            clock: Arc::new(SystemClock),
            options: Arc::new(ControllerOptions::from_config(config)?),
            max_message_length: config.max_message_length,
        })
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn strategy(&self) -> &BounceStrategy {
        &self.strategy
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Fresh controller over the tenant's current configuration
    pub async fn controller(&self, tenant_id: Uuid) -> Result<MaintenanceController, MaintenanceError> {
        MaintenanceController::init(
            tenant_id,
            self.provider.as_ref(),
            Arc::clone(&self.strategy),
            Arc::clone(&self.clock),
            Arc::clone(&self.options),
        )
        .await
    }

    // ===== Configuration =====

    /// Current configuration, defaults when the tenant has none
    pub async fn get_config(&self, tenant_id: Uuid) -> Result<MaintenanceConfig, MaintenanceError> {
        Ok(self.controller(tenant_id).await?.config().clone())
    }

    /// Validate and store a configuration
    pub async fn set_config(
        &self,
        tenant_id: Uuid,
        config: MaintenanceConfig,
    ) -> Result<MaintenanceConfig, MaintenanceError> {
        validate_config(&config, self.max_message_length)?;

        self.provider.set(tenant_id, &config).await.map_err(|e| {
            tracing::error!(%tenant_id, error = %e, "Failed to store maintenance configuration");
            MaintenanceError::Internal
        })?;

        tracing::info!(
            %tenant_id,
            mode = ?config.mode,
            start_enabled = config.start.enabled,
            end_enabled = config.end.enabled,
            "Maintenance configuration updated"
        );

        self.publish(MaintenanceEvent::config_updated(tenant_id, &config)).await;
        Ok(config)
    }

    // ===== Gating =====

    pub async fn can_access(&self, tenant_id: Uuid, operation: &str) -> Result<bool, MaintenanceError> {
        Ok(self.controller(tenant_id).await?.can_access(operation))
    }

    pub async fn decide_bounce(
        &self,
        tenant_id: Uuid,
        context: &BounceContext,
    ) -> Result<BounceAction, MaintenanceError> {
        self.controller(tenant_id).await?.decide_bounce(context)
    }

    pub async fn notify(
        &self,
        tenant_id: Uuid,
        scope: &NotificationScope,
    ) -> Result<Option<NotificationPayload>, MaintenanceError> {
        Ok(self.controller(tenant_id).await?.notify(scope))
    }

    pub async fn status(&self, tenant_id: Uuid) -> Result<MaintenanceStatus, MaintenanceError> {
        Ok(self.controller(tenant_id).await?.status())
    }

    // ===== Remote synchronization =====

    /// Adopt the remote platform's own maintenance mode
    pub async fn sync_from_remote(
        &self,
        tenant_id: Uuid,
        remote: &dyn RemoteMaintenanceQuery,
    ) -> bool {
        let mut controller = match self.controller(tenant_id).await {
            Ok(controller) => controller,
            Err(_) => return false,
        };

        let previous_mode = controller.config().mode;
        if !controller.sync_from_remote(remote, self.provider.as_ref()).await {
            return false;
        }

        let event = MaintenanceEvent::remote_synced(tenant_id, previous_mode, controller.config().mode);
        self.publish(event).await;
        true
    }

    // ===== Helper Methods =====

    async fn publish(&self, event: MaintenanceEvent) {
        let tenant_id = event.tenant_id();
        if let Err(e) = self.event_publisher.publish_audit(event).await {
            // Log error but don't fail the operation
            tracing::warn!(%tenant_id, error = %e, "Failed to publish audit event");
        }
    }
}
