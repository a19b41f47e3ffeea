//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::{BounceAction, MaintenanceError};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

/// Page served when a denied popup or embedded frame should close itself
pub const CLOSE_WINDOW_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Maintenance</title></head>\
<body><script>window.close();</script>\
<p>This page is unavailable during maintenance and can be closed.</p></body></html>\n";

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: MaintenanceError) -> Problem {
    match error {
        MaintenanceError::AccessDenied { message_key } => {
            Problem::new(StatusCode::FORBIDDEN, "Access Denied").with_detail(message_key)
        }

        MaintenanceError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        MaintenanceError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        MaintenanceError::Unclassified { reason } => {
            tracing::error!(%reason, "Unclassified request reached the maintenance gate");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }

        MaintenanceError::Internal => {
            tracing::error!("Internal maintenance service error");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

impl IntoResponse for BounceAction {
    fn into_response(self) -> Response {
        match self {
            BounceAction::Redirect(location) => Redirect::to(&location).into_response(),
            BounceAction::ThrowAccessDenied => {
                map_domain_error(MaintenanceError::access_denied()).into_response()
            }
            BounceAction::CloseWindow => Html(CLOSE_WINDOW_PAGE).into_response(),
            BounceAction::PassThrough => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
