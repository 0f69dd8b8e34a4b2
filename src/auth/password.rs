use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::ApiError;

/// Hash a plaintext password with a fresh random salt. Two calls with the
/// same input produce different digests.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            ApiError::Internal(anyhow::anyhow!(e.to_string()))
        })?
        .to_string();
    Ok(hash)
}

/// Verify a plaintext password against a stored digest, using the salt
/// embedded in the digest. A digest that does not parse is a storage-level
/// corruption, not a mismatch.
pub fn verify_password(plain: &str, digest: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 parse digest error");
        ApiError::InvalidDigestFormat
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
