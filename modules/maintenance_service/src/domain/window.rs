//! Maintenance window evaluation

use crate::contract::{MaintenanceConfig, MaintenanceMode};

/// Whether maintenance is in effect at `now` (Unix seconds)
///
/// Both bounds enabled form a closed interval. A single bound is open-ended on
/// the other side. No bound at all means "active until further notice". An
/// inverted window (start after end) is never active when both are enabled.
pub fn is_active(config: &MaintenanceConfig, now: i64) -> bool {
    if config.mode == MaintenanceMode::Disabled {
        return false;
    }

    match (config.start.enabled, config.end.enabled) {
        (false, false) => true,
        (true, true) => config.start.timestamp <= now && now <= config.end.timestamp,
        (true, false) => now >= config.start.timestamp,
        (false, true) => now <= config.end.timestamp,
    }
}
