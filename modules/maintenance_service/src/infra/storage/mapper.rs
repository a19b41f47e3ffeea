//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{MaintenanceConfig, MaintenanceMode, NotificationLevel, WindowBound};
use uuid::Uuid;

impl TryFrom<entity::Model> for MaintenanceConfig {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let mode = MaintenanceMode::from_code(entity.mode)
            .ok_or_else(|| anyhow::anyhow!("unknown maintenance mode code {}", entity.mode))?;
        let notification_level = NotificationLevel::from_code(entity.notification_level)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown notification level code {}",
                    entity.notification_level
                )
            })?;

        Ok(Self {
            mode,
            notification_level,
            message: entity.message,
            start: WindowBound {
                enabled: entity.start_enabled,
                timestamp: entity.start_time,
            },
            end: WindowBound {
                enabled: entity.end_enabled,
                timestamp: entity.end_time,
            },
        })
    }
}

/// Build an active model for `config` owned by `tenant_id`
pub fn to_active_model(tenant_id: Uuid, config: &MaintenanceConfig) -> entity::ActiveModel {
    use sea_orm::ActiveValue::Set;

    entity::ActiveModel {
        tenant_id: Set(tenant_id),
        mode: Set(config.mode.code()),
        notification_level: Set(config.notification_level.code()),
        message: Set(config.message.clone()),
        start_enabled: Set(config.start.enabled),
        start_time: Set(config.start.timestamp),
        end_enabled: Set(config.end.enabled),
        end_time: Set(config.end.timestamp),
        updated_at: Set(chrono::Utc::now()),
    }
}
