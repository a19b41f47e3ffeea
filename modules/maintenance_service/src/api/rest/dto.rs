//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Enumerations =====

/// Maintenance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceModeDto {
    Disabled,
    ReadOnly,
    Enabled,
}

/// Severity of the maintenance notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevelDto {
    Info,
    Success,
    #[default]
    Warning,
    Error,
}

// ===== Configuration DTOs =====

/// One end of the maintenance window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct WindowBoundDto {
    /// Whether this bound applies
    pub enabled: bool,

    /// Unix timestamp in seconds
    #[schema(example = 1709294400)]
    pub timestamp: i64,
}

/// Wall-clock time in the tenant's zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalTimeDto {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = 1)]
    pub day: u32,
    #[schema(example = 12)]
    pub hour: u32,
    #[schema(example = 0)]
    pub minute: u32,
}

/// Maintenance configuration response DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceConfigDto {
    pub mode: MaintenanceModeDto,

    pub notification_level: NotificationLevelDto,

    /// Notice shown to users while the window is active
    #[schema(example = "Video services are being upgraded.")]
    pub message: String,

    pub start: WindowBoundDto,

    pub end: WindowBoundDto,
}

/// Maintenance configuration update request
///
/// Window bounds are given either as Unix timestamps (`start`, `end`) or as
/// wall-clock times in the tenant zone (`start_local`, `end_local`), not both.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateMaintenanceConfigRequest {
    pub mode: MaintenanceModeDto,

    #[serde(default)]
    pub notification_level: NotificationLevelDto,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub start: Option<WindowBoundDto>,

    #[serde(default)]
    pub end: Option<WindowBoundDto>,

    #[serde(default)]
    pub start_local: Option<LocalTimeDto>,

    #[serde(default)]
    pub end_local: Option<LocalTimeDto>,
}

// ===== Status DTOs =====

/// Maintenance notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub message: String,
    pub level: NotificationLevelDto,
}

/// Maintenance state at the current time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceStatusDto {
    pub mode: MaintenanceModeDto,

    /// Whether the window is in effect right now
    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationDto>,
}

// ===== Access check DTOs =====

/// Query parameters for an access check
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AccessCheckQuery {
    /// Remote operation name
    #[schema(example = "getEpisodes")]
    pub operation: String,
}

/// Access check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessCheckResponse {
    pub operation: String,
    pub allowed: bool,
}
