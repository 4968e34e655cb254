//! Shared HTTP types

pub mod error;
pub mod payload;

pub use error::{messages, ApiError, ValidationErrorResponse};
pub use payload::Payload;
