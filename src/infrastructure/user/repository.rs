//! In-memory user repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserPatch, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository.
///
/// Users are kept in insertion order, which is the order `list` returns.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
        }
    }

}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.read().await.len())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let mut id = UserId::generate();
        while users.iter().any(|u| u.id() == &id) {
            id = UserId::generate();
        }

        let user = User::create(id, user);
        users.push(user.clone());

        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .iter_mut()
            .find(|u| u.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.apply(patch);

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let position = users
            .iter()
            .position(|u| u.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        users.remove(position);

        Ok(())
    }
}
