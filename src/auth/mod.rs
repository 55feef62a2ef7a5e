//! Credential primitives: password hashing and opaque bearer tokens.
//!
//! Passwords are stored as PBKDF2-SHA256 hashes with a per-user random
//! salt. Bearer tokens are random, handed to the client once, and stored
//! server-side only as a SHA-256 hash with an expiry (see the sessions
//! repository).

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const SALT_LENGTH: usize = 32;
const HASH_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Malformed password hash")]
    MalformedHash,
}

/// Hash a password for storage: `{iterations}${salt_b64}${hash_b64}`.
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    let derived = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{}${}${}",
        PBKDF2_ITERATIONS,
        STANDARD.encode(salt),
        STANDARD.encode(derived),
    )
}

/// Check a password against a stored hash string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, CredentialError> {
    let mut parts = stored.split('$');
    let iterations: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or(CredentialError::MalformedHash)?;
    let salt = parts
        .next()
        .and_then(|s| STANDARD.decode(s).ok())
        .ok_or(CredentialError::MalformedHash)?;
    let expected = parts
        .next()
        .and_then(|s| STANDARD.decode(s).ok())
        .ok_or(CredentialError::MalformedHash)?;
    if parts.next().is_some() || salt.len() != SALT_LENGTH || expected.len() != HASH_LENGTH {
        return Err(CredentialError::MalformedHash);
    }

    let derived = derive(password, &salt, iterations);
    Ok(derived.as_slice() == expected.as_slice())
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

/// Generate a cryptographically random salt
fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a bearer token for storage using SHA-256.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    STANDARD.encode(hasher.finalize())
}
