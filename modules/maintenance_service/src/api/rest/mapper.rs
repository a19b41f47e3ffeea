//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract::{
    self, MaintenanceError, MaintenanceMode, NotificationLevel, WindowBound,
};
use chrono::FixedOffset;

// ===== Enumerations =====

impl From<MaintenanceMode> for MaintenanceModeDto {
    fn from(mode: MaintenanceMode) -> Self {
        match mode {
            MaintenanceMode::Disabled => Self::Disabled,
            MaintenanceMode::ReadOnly => Self::ReadOnly,
            MaintenanceMode::Enabled => Self::Enabled,
        }
    }
}

impl From<MaintenanceModeDto> for MaintenanceMode {
    fn from(mode: MaintenanceModeDto) -> Self {
        match mode {
            MaintenanceModeDto::Disabled => Self::Disabled,
            MaintenanceModeDto::ReadOnly => Self::ReadOnly,
            MaintenanceModeDto::Enabled => Self::Enabled,
        }
    }
}

impl From<NotificationLevel> for NotificationLevelDto {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Info => Self::Info,
            NotificationLevel::Success => Self::Success,
            NotificationLevel::Warning => Self::Warning,
            NotificationLevel::Error => Self::Error,
        }
    }
}

impl From<NotificationLevelDto> for NotificationLevel {
    fn from(level: NotificationLevelDto) -> Self {
        match level {
            NotificationLevelDto::Info => Self::Info,
            NotificationLevelDto::Success => Self::Success,
            NotificationLevelDto::Warning => Self::Warning,
            NotificationLevelDto::Error => Self::Error,
        }
    }
}

// ===== Configuration =====

impl From<WindowBound> for WindowBoundDto {
    fn from(bound: WindowBound) -> Self {
        Self {
            enabled: bound.enabled,
            timestamp: bound.timestamp,
        }
    }
}

impl From<WindowBoundDto> for WindowBound {
    fn from(bound: WindowBoundDto) -> Self {
        Self {
            enabled: bound.enabled,
            timestamp: bound.timestamp,
        }
    }
}

impl From<contract::MaintenanceConfig> for MaintenanceConfigDto {
    fn from(config: contract::MaintenanceConfig) -> Self {
        Self {
            mode: config.mode.into(),
            notification_level: config.notification_level.into(),
            message: config.message,
            start: config.start.into(),
            end: config.end.into(),
        }
    }
}

impl LocalTimeDto {
    fn to_bound(self, offset: FixedOffset) -> Result<WindowBound, MaintenanceError> {
        WindowBound::at_local(self.year, self.month, self.day, self.hour, self.minute, offset)
    }
}

fn resolve_bound(
    name: &str,
    bound: Option<WindowBoundDto>,
    local: Option<LocalTimeDto>,
    offset: FixedOffset,
) -> Result<WindowBound, MaintenanceError> {
    match (bound, local) {
        (Some(_), Some(_)) => Err(MaintenanceError::Validation {
            message: format!("{name} and {name}_local are mutually exclusive"),
        }),
        (Some(bound), None) => Ok(bound.into()),
        (None, Some(local)) => local.to_bound(offset),
        (None, None) => Ok(WindowBound::disabled()),
    }
}

impl UpdateMaintenanceConfigRequest {
    /// Build a contract config, reading local times in `offset`
    pub fn into_config(
        self,
        offset: FixedOffset,
    ) -> Result<contract::MaintenanceConfig, MaintenanceError> {
        Ok(contract::MaintenanceConfig {
            mode: self.mode.into(),
            notification_level: self.notification_level.into(),
            message: self.message,
            start: resolve_bound("start", self.start, self.start_local, offset)?,
            end: resolve_bound("end", self.end, self.end_local, offset)?,
        })
    }
}

// ===== Status =====

impl From<contract::NotificationPayload> for NotificationDto {
    fn from(payload: contract::NotificationPayload) -> Self {
        Self {
            message: payload.message,
            level: payload.level.into(),
        }
    }
}

impl From<contract::MaintenanceStatus> for MaintenanceStatusDto {
    fn from(status: contract::MaintenanceStatus) -> Self {
        Self {
            mode: status.mode.into(),
            active: status.active,
            notification: status.notification.map(Into::into),
        }
    }
}
