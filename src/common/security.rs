use anyhow::{Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};

use crate::common::response::ApiError;
use crate::modules::auth::dto::{Identity, TokenClaims};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash password: {e}"))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| anyhow!("stored hash unreadable: {e}"))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| anyhow!("password mismatch"))
}

pub fn issue_token(identity: &Identity, secret: &str, ttl_hours: i64) -> Result<String> {
    let now = get_current_timestamp();
    let ttl = u64::try_from(ttl_hours.max(0) * 60 * 60).unwrap_or(0);

    let claims = TokenClaims {
        user_id: identity.user_id,
        email: identity.email.clone(),
        iat: now,
        exp: now + ttl,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow!("failed to sign token: {e}"))
}

/// Verifies signature, algorithm and expiry, then lifts the claims into an
/// [`Identity`]. Every failure collapses into the same opaque error.
pub fn verify_token(token: &str, secret: &str) -> Result<Identity, ApiError> {
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            ApiError::InvalidCredential
        })?;

    Ok(Identity::from(data.claims))
}
