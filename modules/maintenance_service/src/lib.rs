//! Maintenance Service Module
//!
//! Time-windowed maintenance gating for remote video platform integrations.
//! Every outbound call to the remote platform is checked against the tenant's
//! maintenance mode, and denied calls are bounced to a safe location.

// Public exports
pub mod contract;
pub use contract::{
    client::MaintenanceApi, error::MaintenanceError, BounceAction, BounceContext,
    MaintenanceConfig, MaintenanceMode, MaintenanceStatus, NotificationLevel,
    NotificationPayload, NotificationScope, RemoteError, RemoteMaintenanceQuery,
    RemoteService, RemoteValue, RequestOrigin, WindowBound,
};

pub mod module;
pub use module::MaintenanceServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
