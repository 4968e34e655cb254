//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use crate::config::HashingConfig;
use crate::domain::{DomainError, PasswordDigest};

/// Trait for password hashing operations
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError>;

    /// Verify a password against a digest
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Argon2id hasher with a fixed work factor
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher from configured work parameters
    pub fn new(config: &HashingConfig) -> Result<Self, DomainError> {
        let params = Params::new(config.memory_kib, config.time_cost, config.parallelism, None)
            .map_err(|e| DomainError::configuration(format!("Invalid hashing parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|e| DomainError::hashing(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let parsed_hash = match PasswordHash::new(digest.as_str()) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Cheap hasher for tests
#[cfg(test)]
pub(crate) fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::new(&HashingConfig {
        time_cost: 1,
        memory_kib: 1024,
        parallelism: 1,
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "secret1";

        let digest = hasher.hash(password).unwrap();

        assert_ne!(digest.as_str(), password);
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(password, &digest));
        assert!(!hasher.verify("wrong_password", &digest));
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = fast_hasher();
        let password = "secret1";

        let digest1 = hasher.hash(password).unwrap();
        let digest2 = hasher.hash(password).unwrap();

        // Different due to random salt
        assert_ne!(digest1, digest2);

        assert!(hasher.verify(password, &digest1));
        assert!(hasher.verify(password, &digest2));
    }

    #[test]
    fn test_work_factor_is_encoded() {
        let hasher = Argon2Hasher::new(&HashingConfig {
            time_cost: 3,
            memory_kib: 1024,
            parallelism: 1,
        })
        .unwrap();

        let digest = hasher.hash("secret1").unwrap();
        assert!(digest.as_str().contains("m=1024,t=3,p=1"));
    }

    #[test]
    fn test_verify_invalid_digest() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("password", &PasswordDigest::new("invalid_hash_format")));
        assert!(!hasher.verify("password", &PasswordDigest::new("")));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = Argon2Hasher::new(&HashingConfig {
            time_cost: 0,
            memory_kib: 1024,
            parallelism: 1,
        });

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Argon2Hasher::new(&HashingConfig::default()).is_ok());
    }
}
