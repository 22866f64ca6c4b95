pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;

/// One-way password hashing capability.
///
/// Implementations must never return or log the raw secret.
pub trait SecretHasher: Send + Sync + 'static {
    /// Hash a raw password for storage.
    fn hash(&self, raw: &str) -> Result<String, PasswordError>;

    /// Check a raw password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only when the stored hash
    /// cannot be parsed.
    fn matches(&self, raw: &str, hash: &str) -> Result<bool, PasswordError>;
}
