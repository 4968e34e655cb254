use thiserror::Error;

use super::user::Violation;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed with {count} violation(s)", count = .violations.len())]
    Validation { violations: Vec<Violation> },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Hashing error: {message}")]
    Hashing { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::Validation { violations }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
