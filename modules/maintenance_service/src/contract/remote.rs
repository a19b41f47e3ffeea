//! Remote platform seams
//!
//! A remote platform client exposes its sub-resources as [`RemoteService`]
//! values: named operations taking a variable list of JSON arguments. The
//! maintenance proxy wraps these without knowing the operation names.

use super::model::RemoteMaintenanceStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Errors raised by the remote platform client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("operation not supported by the remote platform")]
    Unsupported,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote platform returned {code}: {message}")]
    Status { code: u16, message: String },
}

/// Value returned by a remote operation
pub enum RemoteValue {
    /// Plain response data
    Data(serde_json::Value),
    /// A service handle, possibly the called service itself (fluent API)
    Handle(Arc<dyn RemoteService>),
}

impl std::fmt::Debug for RemoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Handle(service) => f.debug_tuple("Handle").field(&service.name()).finish(),
        }
    }
}

/// A remote sub-resource with named operations
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Name of the sub-resource (e.g. "events", "series")
    fn name(&self) -> &str;

    /// Invoke `operation` with positional arguments
    async fn call(
        self: Arc<Self>,
        operation: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<RemoteValue, RemoteError>;
}

/// Optional capability: the remote platform reports its own maintenance state
#[async_trait]
pub trait RemoteMaintenanceQuery: Send + Sync {
    /// Returns [`RemoteError::Unsupported`] when the platform has no such endpoint
    async fn remote_maintenance_status(&self) -> Result<RemoteMaintenanceStatus, RemoteError>;
}
