//! HTTP error responses for the user pages

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::{DomainError, Violation};

/// Generic messages shown to clients; details only go to the logs
pub mod messages {
    pub const LIST_FAILED: &str = "Error fetching the user list";
    pub const CREATE_FAILED: &str = "Error creating the user";
    pub const FETCH_FAILED: &str = "Error fetching the user";
    pub const UPDATE_FAILED: &str = "Error updating the user";
    pub const DELETE_FAILED: &str = "Error deleting the user";
}

/// Body of a 400 response to an invalid creation request
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<Violation>,
}

#[derive(Debug)]
enum ApiErrorBody {
    Violations(ValidationErrorResponse),
    Text(&'static str),
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    /// Map a domain failure to a response.
    ///
    /// Validation failures keep their violations; every other kind collapses
    /// to a 500 carrying `message`, including not-found.
    pub fn from_domain(err: DomainError, message: &'static str) -> Self {
        match err {
            DomainError::Validation { violations } => Self::validation(violations),
            DomainError::NotFound { .. } | DomainError::InvalidId { .. } => {
                warn!(error = %err, "{}", message);
                Self::internal(message)
            }
            other => {
                error!(error = %other, "{}", message);
                Self::internal(message)
            }
        }
    }

    /// Bad request listing every violated field rule
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody::Violations(ValidationErrorResponse { errors: violations }),
        }
    }

    /// Internal server error with a plain-text message
    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody::Text(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            ApiErrorBody::Violations(body) => (self.status, Json(body)).into_response(),
            ApiErrorBody::Text(message) => (self.status, message).into_response(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            ApiErrorBody::Violations(body) => {
                write!(f, "{}: {} violation(s)", self.status, body.errors.len())
            }
            ApiErrorBody::Text(message) => write!(f, "{}: {}", self.status, message),
        }
    }
}

impl std::error::Error for ApiError {}
