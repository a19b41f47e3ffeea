//! Contract error types for maintenance service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Message key carried by access denials raised while maintenance is active
pub const ACCESS_DENIED_MESSAGE_KEY: &str = "maintenance:access_denied";

/// Maintenance service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceError {
    /// A gated operation was refused and no redirect or close action applies
    AccessDenied {
        /// User-facing message key
        message_key: String,
    },
    /// Configuration rejected at write time
    Validation {
        /// Validation error message
        message: String,
    },
    /// Resource not found
    NotFound {
        /// Resource type
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// The request context could not be classified as web, CLI, background or test
    Unclassified {
        /// What was missing from the context
        reason: String,
    },
    /// Internal error
    Internal,
}

impl MaintenanceError {
    /// Access denial with the default message key
    pub fn access_denied() -> Self {
        Self::AccessDenied {
            message_key: ACCESS_DENIED_MESSAGE_KEY.to_string(),
        }
    }
}

impl std::fmt::Display for MaintenanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied { message_key } => {
                write!(f, "Access denied during maintenance: {}", message_key)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Unclassified { reason } => {
                write!(f, "Cannot classify request context: {}", reason)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for MaintenanceError {}
