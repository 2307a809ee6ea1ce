//! Password value object - Domain layer password handling.
//!
//! Encapsulates one-way hashing and verification behind a small value
//! object so the raw hash never leaks into calling code by accident.

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
///
/// Wraps a salted bcrypt hash; the salt and work factor are embedded in the
/// hash string, so verification needs only the stored value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
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
    /// # Arguments
    /// * `plain_text` - The raw password to hash (minimum 6 characters)
    /// * `cost` - bcrypt work factor
    ///
    /// # Errors
    /// Returns a validation error if the password is too short, or an
    /// internal error if hashing fails.
    pub fn new(plain_text: &str, cost: u32) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = bcrypt::hash(plain_text, cost)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
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
    /// Returns `Ok(false)` for a wrong password. A stored hash that cannot
    /// be parsed is an error, not a failed match.
    pub fn verify(&self, plain_text: &str) -> AppResult<bool> {
        bcrypt::verify(plain_text, &self.hash)
            .map_err(|e| AppError::internal(format!("Malformed password hash: {}", e)))
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
