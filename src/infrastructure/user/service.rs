//! User service orchestrating validation, hashing and storage

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{
    validate_new_user, NewUser, PasswordDigest, User, UserId, UserPatch, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Clone, Default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request for updating a user. Only these fields can ever be changed.
#[derive(Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// New plaintext password; empty means "keep the current one"
    pub password: Option<String>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// User service for record management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let user_id = UserId::parse(id)?;

        self.repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// Validate, hash and store a new user.
    ///
    /// Nothing is written when validation fails.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_new_user(&request.name, &request.email, &request.password)
            .map_err(DomainError::validation)?;

        let password = self.hash_password(request.password).await?;

        let user = self
            .repository
            .create(NewUser {
                name: request.name,
                email: request.email,
                password,
            })
            .await?;

        info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    /// Apply a partial update. A supplied password is re-hashed first.
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<(), DomainError> {
        let user_id = UserId::parse(id)?;

        let password = match request.password.filter(|p| !p.is_empty()) {
            Some(plaintext) => Some(self.hash_password(plaintext).await?),
            None => None,
        };
        let password_changed = password.is_some();

        let patch = UserPatch {
            name: request.name,
            email: request.email,
            password,
        };

        if patch.is_empty() {
            debug!(user_id = %user_id, "Update carries no fields");
        }

        self.repository.update(&user_id, patch).await?;

        info!(user_id = %user_id, password_changed, "User updated");
        Ok(())
    }

    /// Hard-delete a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let user_id = UserId::parse(id)?;
        self.repository.delete(&user_id).await?;

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Check a plaintext password against the stored digest
    pub async fn verify_password(&self, id: &str, password: &str) -> Result<bool, DomainError> {
        let user = self.get(id).await?;
        Ok(self.hasher.verify(password, user.password()))
    }

    async fn hash_password(&self, password: String) -> Result<PasswordDigest, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::hashing(format!("Hashing task failed: {}", e)))?
    }
}
