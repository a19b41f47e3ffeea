//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models, the native client trait and
//! the traits a remote platform client implements to be gated.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;
pub mod remote;

pub use client::MaintenanceApi;
pub use error::MaintenanceError;
pub use model::{
    BounceAction, BounceContext, MaintenanceConfig, MaintenanceMode, MaintenanceStatus,
    NotificationLevel, NotificationPayload, NotificationScope, RemoteMaintenanceStatus,
    RequestOrigin, WindowBound,
};
pub use remote::{RemoteError, RemoteMaintenanceQuery, RemoteService, RemoteValue};
