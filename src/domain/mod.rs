//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    validate_new_user, NewUser, PasswordDigest, User, UserId, UserPatch, UserRepository,
    Violation,
};
