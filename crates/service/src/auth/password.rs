//! Argon2 hashing. Both operations are CPU-bound and run on the blocking pool.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::errors::AppError;

pub async fn hash_password(plain: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::system(format!("password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::system(format!("hashing task failed: {e}")))?
}

/// `Ok(false)` on mismatch; a stored hash that does not parse is a system fault.
pub async fn verify_password(plain: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| AppError::system(format!("stored password hash is malformed: {e}")))?;
        Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| AppError::system(format!("verification task failed: {e}")))?
}
