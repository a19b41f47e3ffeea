//! Domain events for maintenance service
//!
//! Events are published to the audit topic whenever a tenant's maintenance
//! configuration changes, either through an administrator or through a
//! synchronization with the remote platform.

use crate::contract::{MaintenanceConfig, MaintenanceMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for maintenance configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MaintenanceEvent {
    /// Configuration was written by an administrator
    ConfigUpdated(ConfigUpdatedEvent),
    /// Mode was adopted from the remote platform
    RemoteSynced(RemoteSyncedEvent),
}

/// Event data for a configuration write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdatedEvent {
    /// Tenant ID
    pub tenant_id: Uuid,
    /// Mode code after the write (0 disabled, 1 read-only, 2 enabled)
    pub mode: i16,
    /// Whether the window start is enabled
    pub start_enabled: bool,
    /// Whether the window end is enabled
    pub end_enabled: bool,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

/// Event data for a remote synchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSyncedEvent {
    /// Tenant ID
    pub tenant_id: Uuid,
    /// Mode code before the sync
    pub previous_mode: i16,
    /// Mode code after the sync
    pub mode: i16,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an audit event
    async fn publish_audit(&self, event: MaintenanceEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish_audit(&self, _event: MaintenanceEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

impl MaintenanceEvent {
    /// Create a new ConfigUpdated event
    pub fn config_updated(tenant_id: Uuid, config: &MaintenanceConfig) -> Self {
        MaintenanceEvent::ConfigUpdated(ConfigUpdatedEvent {
            tenant_id,
            mode: config.mode.code(),
            start_enabled: config.start.enabled,
            end_enabled: config.end.enabled,
            timestamp: Utc::now(),
        })
    }

    /// Create a new RemoteSynced event
    pub fn remote_synced(
        tenant_id: Uuid,
        previous_mode: MaintenanceMode,
        mode: MaintenanceMode,
    ) -> Self {
        MaintenanceEvent::RemoteSynced(RemoteSyncedEvent {
            tenant_id,
            previous_mode: previous_mode.code(),
            mode: mode.code(),
            timestamp: Utc::now(),
        })
    }

    /// Tenant the event belongs to
    pub fn tenant_id(&self) -> Uuid {
        match self {
            Self::ConfigUpdated(e) => e.tenant_id,
            Self::RemoteSynced(e) => e.tenant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::WindowBound;

    #[test]
    fn test_config_updated_event_creation() {
        let tenant_id = Uuid::new_v4();
        let config = MaintenanceConfig {
            mode: MaintenanceMode::ReadOnly,
            start: WindowBound::at(100),
            ..MaintenanceConfig::default()
        };

        match MaintenanceEvent::config_updated(tenant_id, &config) {
            MaintenanceEvent::ConfigUpdated(e) => {
                assert_eq!(e.tenant_id, tenant_id);
                assert_eq!(e.mode, 1);
                assert!(e.start_enabled);
                assert!(!e.end_enabled);
            }
            _ => panic!("Expected ConfigUpdated event"),
        }
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = MaintenanceEvent::remote_synced(
            Uuid::new_v4(),
            MaintenanceMode::Disabled,
            MaintenanceMode::Enabled,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "remote_synced");
        assert_eq!(json["previous_mode"], 0);
        assert_eq!(json["mode"], 2);
    }

    #[tokio::test]
    async fn test_noop_event_publisher() {
        let tenant_id = Uuid::new_v4();
        let event = MaintenanceEvent::config_updated(tenant_id, &MaintenanceConfig::default());
        assert_eq!(event.tenant_id(), tenant_id);
        assert!(NoOpEventPublisher.publish_audit(event).await.is_ok());
    }
}
