//! Password value object - one-way credential hashing.
//!
//! Argon2id with fixed, explicit cost parameters. Every hash carries its own
//! random salt and parameters in PHC string form, so verification never
//! needs anything but the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;

use crate::constants::{ARGON2_ITERATIONS, ARGON2_MEMORY_KIB, ARGON2_PARALLELISM};
use crate::error::{DomainError, DomainResult};

/// Hash verified when the looked-up account does not exist.
static DECOY: Lazy<Option<Password>> = Lazy::new(|| Password::new("decoy-credential").ok());

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns [`DomainError::Hashing`] if the hasher rejects the input or
    /// its parameters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Returns false for a wrong password and for a malformed stored hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Spend one verification's worth of work against a decoy hash.
    ///
    /// Called on the "no such account" path so it is not measurably faster
    /// than the "wrong password" path.
    pub fn verify_decoy(plain_text: &str) {
        if let Some(decoy) = DECOY.as_ref() {
            let _ = decoy.verify(plain_text);
        }
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()?
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    fn argon2() -> DomainResult<Argon2<'static>> {
        let params = Params::new(
            ARGON2_MEMORY_KIB,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            None,
        )
        .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let password = Password::new("secret").unwrap();

        assert_ne!(password.as_str(), "secret");
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_empty_password_hashes() {
        let password = Password::new("").unwrap();
        assert!(password.verify(""));
        assert!(!password.verify("x"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        for hash in ["", "not-a-hash", "$argon2id$v=19$m=19456", "$2a$14$abcdefghijklmnopqrstuv"] {
            assert!(!Password::from_hash(hash).verify("anything"));
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }

    #[test]
    fn test_verify_decoy_does_not_panic() {
        Password::verify_decoy("whatever");
    }
}
