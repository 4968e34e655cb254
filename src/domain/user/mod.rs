//! User domain
//!
//! This module provides domain types and traits for user records,
//! including the user entity, creation-time validation, and the
//! repository trait implemented by the storage backends.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, PasswordDigest, User, UserId, UserPatch};
pub use repository::UserRepository;
pub use validation::{validate_new_user, Violation, MIN_PASSWORD_LENGTH};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
