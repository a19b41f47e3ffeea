//! Per-request maintenance controller
//!
//! A controller holds one tenant's configuration snapshot for the lifetime of
//! a request, so the mode cannot flip halfway through. Every request builds a
//! fresh controller; nothing is cached across requests.

use super::bounce::BounceStrategy;
use super::clock::Clock;
use super::repository::ConfigurationProvider;
use super::validation::tenant_offset;
use super::{policy, window};
use crate::config::Config;
use crate::contract::{
    BounceAction, BounceContext, MaintenanceConfig, MaintenanceError, MaintenanceMode,
    MaintenanceStatus, NotificationPayload, NotificationScope, RemoteError,
    RemoteMaintenanceQuery, RequestOrigin,
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Settings shared by all controllers of a module instance
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Tenant's user-facing zone
    pub offset: FixedOffset,
    /// Notice used when the configured message is empty
    pub fallback_message: String,
    /// Upper bound for remote status queries
    pub sync_timeout: Duration,
}

impl ControllerOptions {
    pub fn from_config(config: &Config) -> Result<Self, MaintenanceError> {
        Ok(Self {
            offset: tenant_offset(config.utc_offset_minutes)?,
            fallback_message: config.fallback_message.clone(),
            sync_timeout: config.sync_timeout,
        })
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            offset: Utc.fix(),
            fallback_message: config.fallback_message,
            sync_timeout: config.sync_timeout,
        }
    }
}

/// Maintenance gate for one tenant and one request
pub struct MaintenanceController {
    tenant_id: Uuid,
    config: MaintenanceConfig,
    strategy: Arc<BounceStrategy>,
    clock: Arc<dyn Clock>,
    options: Arc<ControllerOptions>,
}

impl MaintenanceController {
    /// Load the tenant's configuration; an unconfigured tenant gets the defaults
    pub async fn init(
        tenant_id: Uuid,
        provider: &dyn ConfigurationProvider,
        strategy: Arc<BounceStrategy>,
        clock: Arc<dyn Clock>,
        options: Arc<ControllerOptions>,
    ) -> Result<Self, MaintenanceError> {
        let config = match provider.get(tenant_id).await {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::debug!(%tenant_id, "No maintenance configuration stored, using defaults");
                MaintenanceConfig::default()
            }
            Err(e) => {
                tracing::error!(%tenant_id, error = %e, "Failed to load maintenance configuration");
                return Err(MaintenanceError::Internal);
            }
        };

        Ok(Self::from_snapshot(tenant_id, config, strategy, clock, options))
    }

    /// Controller over an already loaded configuration
    pub fn from_snapshot(
        tenant_id: Uuid,
        config: MaintenanceConfig,
        strategy: Arc<BounceStrategy>,
        clock: Arc<dyn Clock>,
        options: Arc<ControllerOptions>,
    ) -> Self {
        Self {
            tenant_id,
            config,
            strategy,
            clock,
            options,
        }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn config(&self) -> &MaintenanceConfig {
        &self.config
    }

    /// Current time in the tenant zone
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.options.offset)
    }

    /// Whether the maintenance window is in effect right now
    pub fn is_active(&self) -> bool {
        window::is_active(&self.config, self.now().timestamp())
    }

    /// Whether `operation` may reach the remote platform right now
    pub fn can_access(&self, operation: &str) -> bool {
        let allowed = policy::is_allowed(&self.config, operation, self.now().timestamp());
        tracing::debug!(
            tenant_id = %self.tenant_id,
            operation,
            mode = ?self.config.mode,
            allowed,
            "Maintenance gate decision"
        );
        allowed
    }

    /// How to divert a denied request
    pub fn decide_bounce(&self, context: &BounceContext) -> Result<BounceAction, MaintenanceError> {
        if context.origin == RequestOrigin::Unknown {
            return Err(MaintenanceError::Unclassified {
                reason: "request is neither web, CLI, background nor test".to_string(),
            });
        }

        let action = self.strategy.resolve(context);
        tracing::debug!(
            tenant_id = %self.tenant_id,
            target = %context.target,
            referer = ?context.referer,
            action = ?action,
            "Resolved maintenance bounce"
        );
        Ok(action)
    }

    /// Notice for the current state, ignoring de-duplication
    pub fn notification(&self) -> Option<NotificationPayload> {
        if !self.is_active() {
            return None;
        }

        let message = if self.config.message.trim().is_empty() {
            self.options.fallback_message.clone()
        } else {
            self.config.message.clone()
        };

        Some(NotificationPayload {
            message,
            level: self.config.notification_level,
        })
    }

    /// Notice to render, at most once per scope
    pub fn notify(&self, scope: &NotificationScope) -> Option<NotificationPayload> {
        let payload = self.notification()?;
        scope.claim().then_some(payload)
    }

    pub fn status(&self) -> MaintenanceStatus {
        let notification = self.notification();
        MaintenanceStatus {
            mode: self.config.mode,
            active: notification.is_some(),
            notification,
        }
    }

    /// Adopt the remote platform's own maintenance mode
    ///
    /// Returns false when the remote does not support the query, the query
    /// fails or times out, or the write fails. The snapshot is only updated
    /// after a successful write.
    pub async fn sync_from_remote(
        &mut self,
        remote: &dyn RemoteMaintenanceQuery,
        provider: &dyn ConfigurationProvider,
    ) -> bool {
        let tenant_id = self.tenant_id;
        let status = match tokio::time::timeout(
            self.options.sync_timeout,
            remote.remote_maintenance_status(),
        )
        .await
        {
            Ok(Ok(status)) => status,
            Ok(Err(RemoteError::Unsupported)) => {
                tracing::warn!(%tenant_id, "Remote platform does not report maintenance status");
                return false;
            }
            Ok(Err(e)) => {
                tracing::warn!(%tenant_id, error = %e, "Remote maintenance status query failed");
                return false;
            }
            Err(_) => {
                tracing::warn!(
                    %tenant_id,
                    timeout = ?self.options.sync_timeout,
                    "Remote maintenance status query timed out"
                );
                return false;
            }
        };

        let current = match provider.get(tenant_id).await {
            Ok(stored) => stored.unwrap_or_else(|| self.config.clone()),
            Err(e) => {
                tracing::warn!(%tenant_id, error = %e, "Failed to re-read maintenance configuration");
                return false;
            }
        };

        let mode = MaintenanceMode::from_remote(status);
        let updated = MaintenanceConfig { mode, ..current };
        if let Err(e) = provider.set(tenant_id, &updated).await {
            tracing::warn!(%tenant_id, error = %e, "Failed to store synchronized maintenance mode");
            return false;
        }

        tracing::info!(%tenant_id, mode = ?mode, "Maintenance mode synchronized from remote platform");
        self.config = updated;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{NotificationLevel, RemoteMaintenanceStatus, WindowBound};
    use crate::domain::clock::FixedClock;
    use crate::infra::storage::memory::InMemoryConfigurationProvider;
    use async_trait::async_trait;

    const NOW: i64 = 1_700_000_000;

    fn controller(config: MaintenanceConfig) -> MaintenanceController {
        MaintenanceController::from_snapshot(
            Uuid::new_v4(),
            config,
            Arc::new(BounceStrategy::from_config(&Config::default())),
            Arc::new(FixedClock::at_timestamp(NOW)),
            Arc::new(ControllerOptions::default()),
        )
    }

    struct StaticRemote(Result<RemoteMaintenanceStatus, RemoteError>);

    #[async_trait]
    impl RemoteMaintenanceQuery for StaticRemote {
        async fn remote_maintenance_status(&self) -> Result<RemoteMaintenanceStatus, RemoteError> {
            self.0.clone()
        }
    }

    struct StalledRemote;

    #[async_trait]
    impl RemoteMaintenanceQuery for StalledRemote {
        async fn remote_maintenance_status(&self) -> Result<RemoteMaintenanceStatus, RemoteError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(RemoteError::Unsupported)
        }
    }

    #[tokio::test]
    async fn test_init_defaults_for_unconfigured_tenant() {
        let provider = InMemoryConfigurationProvider::new();
        let c = MaintenanceController::init(
            Uuid::new_v4(),
            &provider,
            Arc::new(BounceStrategy::from_config(&Config::default())),
            Arc::new(FixedClock::at_timestamp(NOW)),
            Arc::new(ControllerOptions::default()),
        )
        .await
        .unwrap();

        assert_eq!(c.config().mode, MaintenanceMode::Disabled);
        assert_eq!(c.config().notification_level, NotificationLevel::Warning);
        assert_eq!(c.config().message, "");
        assert!(!c.config().start.enabled && !c.config().end.enabled);
        assert!(c.can_access("deleteEvent"));
    }

    #[test]
    fn test_notify_once_per_scope() {
        let c = controller(MaintenanceConfig {
            message: "Upgrade in progress".to_string(),
            ..MaintenanceConfig::with_mode(MaintenanceMode::Enabled)
        });
        let scope = NotificationScope::new();

        let first = c.notify(&scope).unwrap();
        assert_eq!(first.message, "Upgrade in progress");
        assert_eq!(first.level, NotificationLevel::Warning);
        assert!(c.notify(&scope).is_none());

        let next_page = NotificationScope::new();
        assert!(c.notify(&next_page).is_some());
    }

    #[test]
    fn test_notify_inactive_does_not_claim_scope() {
        let c = controller(MaintenanceConfig {
            start: WindowBound::at(NOW + 10),
            ..MaintenanceConfig::with_mode(MaintenanceMode::Enabled)
        });
        let scope = NotificationScope::new();
        assert!(c.notify(&scope).is_none());
        assert!(!scope.is_notified());
    }

    #[test]
    fn test_empty_message_uses_fallback() {
        let c = controller(MaintenanceConfig {
            message: "  ".to_string(),
            ..MaintenanceConfig::with_mode(MaintenanceMode::ReadOnly)
        });
        let payload = c.notification().unwrap();
        assert_eq!(payload.message, ControllerOptions::default().fallback_message);
    }

    #[test]
    fn test_status_reflects_window() {
        let active = controller(MaintenanceConfig::with_mode(MaintenanceMode::ReadOnly)).status();
        assert!(active.active);
        assert!(active.notification.is_some());

        let idle = controller(MaintenanceConfig::default()).status();
        assert!(!idle.active);
        assert!(idle.notification.is_none());
    }

    #[test]
    fn test_decide_bounce_unclassified_context() {
        let c = controller(MaintenanceConfig::with_mode(MaintenanceMode::Enabled));
        let ctx = BounceContext::non_interactive(RequestOrigin::Unknown);
        assert!(matches!(
            c.decide_bounce(&ctx),
            Err(MaintenanceError::Unclassified { .. })
        ));
        let cli = BounceContext::non_interactive(RequestOrigin::Cli);
        assert_eq!(c.decide_bounce(&cli).unwrap(), BounceAction::ThrowAccessDenied);
    }

    #[test]
    fn test_now_is_rendered_in_tenant_zone() {
        let options = ControllerOptions {
            offset: FixedOffset::east_opt(2 * 3600).unwrap(),
            ..ControllerOptions::default()
        };
        let c = MaintenanceController::from_snapshot(
            Uuid::new_v4(),
            MaintenanceConfig::default(),
            Arc::new(BounceStrategy::from_config(&Config::default())),
            Arc::new(FixedClock::at_timestamp(NOW)),
            Arc::new(options),
        );
        assert_eq!(c.now().timestamp(), NOW);
        assert_eq!(c.now().offset().local_minus_utc(), 7200);
    }

    #[tokio::test]
    async fn test_sync_adopts_remote_mode() {
        let provider = InMemoryConfigurationProvider::new();
        let mut c = controller(MaintenanceConfig::default());
        let remote = StaticRemote(Ok(RemoteMaintenanceStatus {
            in_maintenance: true,
            read_only: true,
        }));

        assert!(c.sync_from_remote(&remote, &provider).await);
        assert_eq!(c.config().mode, MaintenanceMode::ReadOnly);
        let stored = provider.get(c.tenant_id()).await.unwrap().unwrap();
        assert_eq!(stored.mode, MaintenanceMode::ReadOnly);
    }

    #[tokio::test]
    async fn test_sync_unsupported_returns_false() {
        let provider = InMemoryConfigurationProvider::new();
        let mut c = controller(MaintenanceConfig::default());
        let remote = StaticRemote(Err(RemoteError::Unsupported));

        assert!(!c.sync_from_remote(&remote, &provider).await);
        assert_eq!(c.config().mode, MaintenanceMode::Disabled);
        assert!(provider.get(c.tenant_id()).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_times_out() {
        let provider = InMemoryConfigurationProvider::new();
        let mut c = controller(MaintenanceConfig::default());
        assert!(!c.sync_from_remote(&StalledRemote, &provider).await);
    }
}
