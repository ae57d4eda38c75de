//! Signed product keys gating privileged signup.
//!
//! A key is the bcrypt hash of `email-role-secret`. Validation recomputes
//! the payload locally and runs a one-way hash comparison; the plaintext
//! payload never travels over the wire.

use thiserror::Error;

use crate::config;
use crate::database::models::user::UserRole;

#[derive(Debug, Error)]
pub enum ProductKeyError {
    #[error("Product key secret not configured")]
    MissingSecret,

    #[error("Hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

fn signing_payload(email: &str, role: UserRole, secret: &str) -> String {
    format!("{}-{}-{}", email, role, secret)
}

/// Issue a key authorizing `email` to register with `role`.
pub fn generate(email: &str, role: UserRole) -> Result<String, ProductKeyError> {
    let security = &config::config().security;
    if security.product_key_secret.is_empty() {
        return Err(ProductKeyError::MissingSecret);
    }

    let payload = signing_payload(email, role, &security.product_key_secret);
    Ok(bcrypt::hash(payload, security.bcrypt_cost)?)
}

/// Check a presented key against the recomputed payload for (email, role).
/// A malformed key is a mismatch, not an error.
pub fn verify(email: &str, role: UserRole, key: &str) -> Result<bool, ProductKeyError> {
    let security = &config::config().security;
    if security.product_key_secret.is_empty() {
        return Err(ProductKeyError::MissingSecret);
    }

    let payload = signing_payload(email, role, &security.product_key_secret);
    Ok(bcrypt::verify(payload, key).unwrap_or(false))
}
