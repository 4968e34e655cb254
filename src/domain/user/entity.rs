//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier received from a client
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("'{}' is not a user ID: {}", id, e)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Salted one-way password hash. Never holds plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

/// Persisted user record
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    /// Digest is never exposed in serialization
    #[serde(skip_serializing)]
    password: PasswordDigest,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A user that has been validated and hashed but not yet stored
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: PasswordDigest,
}

/// Fields an update may change. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<PasswordDigest>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl User {
    /// Assign an identifier to a new user
    pub fn create(id: UserId, new_user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from stored columns
    pub fn restore(
        id: UserId,
        name: String,
        email: String,
        password: PasswordDigest,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply the supplied fields of a patch
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(email) = patch.email {
            self.email = email;
        }

        if let Some(password) = patch.password {
            self.password = password;
        }

        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::create(
            UserId::generate(),
            NewUser {
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                password: PasswordDigest::new("$argon2id$digest"),
            },
        )
    }

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let err = UserId::parse("not-an-id").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { .. }));
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user();

        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email(), "ana@x.com");
        assert_eq!(user.password().as_str(), "$argon2id$digest");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut user = create_test_user();
        let before = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(5));

        user.apply(UserPatch {
            name: Some("NewName".to_string()),
            ..Default::default()
        });

        assert_eq!(user.name(), "NewName");
        assert_eq!(user.email(), "ana@x.com");
        assert_eq!(user.password().as_str(), "$argon2id$digest");
        assert!(user.updated_at() > before);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_serialization_excludes_password() {
        let user = create_test_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"name\":\"Ana\""));
    }

    #[test]
    fn test_digest_debug_is_redacted() {
        let digest = PasswordDigest::new("$argon2id$secret");
        assert_eq!(format!("{:?}", digest), "PasswordDigest([REDACTED])");
    }
}
