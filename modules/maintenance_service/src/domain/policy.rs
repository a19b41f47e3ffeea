//! Access policy: which operations may run during maintenance

use super::window;
use crate::contract::{MaintenanceConfig, MaintenanceMode};

/// Name-based read classification
///
/// Any operation whose name contains "get" (case-insensitive, anywhere in the
/// name) counts as a read. `"widget"` and `"forgetPassword"` therefore count
/// as reads too.
pub fn is_read_operation(operation: &str) -> bool {
    operation.to_ascii_lowercase().contains("get")
}

/// Whether `operation` may reach the remote platform at `now` (Unix seconds)
pub fn is_allowed(config: &MaintenanceConfig, operation: &str, now: i64) -> bool {
    if !window::is_active(config, now) {
        return true;
    }

    config.mode == MaintenanceMode::ReadOnly && is_read_operation(operation)
}
