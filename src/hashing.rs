use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Marks an encoded password that can never be verified.
pub const UNUSABLE_PASSWORD_PREFIX: char = '!';

/// Password hashing strategy injected into the account store.
pub trait PasswordHashing: Send + Sync {
    fn hash(&self, raw: &str) -> AppResult<String>;

    fn verify(&self, raw: &str, encoded: &str) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hashing;

impl PasswordHashing for Argon2Hashing {
    fn hash(&self, raw: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, raw: &str, encoded: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(encoded) else {
            return false;
        };
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Encodes `raw` with `hasher`, or produces an unusable value when no password
/// was given.
pub fn make_password(hasher: &dyn PasswordHashing, raw: Option<&str>) -> AppResult<String> {
    match raw {
        Some(raw) => hasher.hash(raw),
        None => Ok(format!("{UNUSABLE_PASSWORD_PREFIX}{}", Uuid::new_v4().simple())),
    }
}

pub fn check_password(hasher: &dyn PasswordHashing, raw: &str, encoded: &str) -> bool {
    if encoded.starts_with(UNUSABLE_PASSWORD_PREFIX) {
        return false;
    }
    hasher.verify(raw, encoded)
}
