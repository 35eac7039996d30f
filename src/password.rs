//! Password hashing helpers.
//!
//! Passwords are hashed with Argon2id (default parameters) and stored as PHC
//! strings, so the salt and parameters travel with the digest. Every call to
//! [`hash`] draws a fresh random salt.

use anyhow::{Result, anyhow};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;

/// Well-formed digest with default Argon2id parameters that no password
/// matches. Login verifies against it when the email is unknown so both
/// failure paths cost one hash.
pub const DUMMY_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a plaintext password into an Argon2id PHC string.
///
/// # Errors
/// Returns an error if the hasher rejects the input (e.g. it exceeds the
/// maximum password length).
pub fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;
    Ok(digest.to_string())
}

/// Check a plaintext password against a stored digest.
///
/// # Errors
/// Returns an error only if `digest` is not a valid PHC string. A wrong
/// password yields `Ok(false)`.
pub fn verify(plaintext: &str, digest: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(digest).map_err(|e| anyhow!("invalid stored password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}
