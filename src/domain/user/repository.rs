//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId, UserPatch};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// List all users in store-native order
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Persist a new user, assigning its ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Apply the supplied fields to an existing user.
    /// Fails with `NotFound` when no user has this ID.
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<(), DomainError>;

    /// Hard-delete a user. Fails with `NotFound` when no user has this ID.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
