//! Write-time validation and wall-clock conversion for maintenance configs

use crate::contract::{MaintenanceConfig, MaintenanceError, WindowBound};
use chrono::{FixedOffset, TimeZone};

/// Validate a configuration before it is stored
///
/// An enabled start must not come after an enabled end. Stored configs are
/// not re-checked on read.
pub fn validate_config(
    config: &MaintenanceConfig,
    max_message_length: usize,
) -> Result<(), MaintenanceError> {
    if config.start.enabled && config.end.enabled && config.start.timestamp > config.end.timestamp
    {
        return Err(MaintenanceError::Validation {
            message: format!(
                "maintenance start ({}) must not be after maintenance end ({})",
                config.start.timestamp, config.end.timestamp
            ),
        });
    }

    let length = config.message.chars().count();
    if length > max_message_length {
        return Err(MaintenanceError::Validation {
            message: format!(
                "maintenance message is {} characters long, at most {} allowed",
                length, max_message_length
            ),
        });
    }

    Ok(())
}

/// Fixed offset for a tenant zone given in minutes east of UTC
pub fn tenant_offset(utc_offset_minutes: i32) -> Result<FixedOffset, MaintenanceError> {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| MaintenanceError::Validation {
            message: format!("invalid UTC offset: {} minutes", utc_offset_minutes),
        })
}

/// Convert wall-clock components authored in `offset` to a Unix timestamp
pub fn local_to_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    offset: FixedOffset,
) -> Result<i64, MaintenanceError> {
    offset
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .map(|local| local.timestamp())
        .ok_or_else(|| MaintenanceError::Validation {
            message: format!(
                "invalid date/time: {:04}-{:02}-{:02} {:02}:{:02}",
                year, month, day, hour, minute
            ),
        })
}

impl WindowBound {
    /// Enabled bound at a wall-clock time in the tenant zone
    pub fn at_local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        offset: FixedOffset,
    ) -> Result<Self, MaintenanceError> {
        local_to_timestamp(year, month, day, hour, minute, offset).map(WindowBound::at)
    }
}
