//! Credential authentication: password hashing and session tokens.
//!
//! Session tokens are HS256 JWTs signed with `JWT_SECRET` and sent as
//! `Authorization: Bearer <token>`.

mod extractor;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AppError, AppResult};
use crate::models::SessionClaims;

pub use extractor::SessionAuth;

/// Session JWT issuer.
pub const SESSION_ISSUER: &str = "commit-academy";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password with bcrypt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Issue a session token. Returns the token and its expiry.
pub fn create_session_token(
    user_id: &str,
    email: &str,
    secret: &SecretString,
    ttl_hours: u64,
) -> AppResult<(String, DateTime<Utc>)> {
    let now = Utc::now();
    let exp = now + Duration::hours(ttl_hours as i64);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        iss: SESSION_ISSUER.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id: user_id.to_string(),
        email: email.to_string(),
    };

    let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    let token = encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))?;

    Ok((token, exp))
}

/// Verify a session token and return its claims.
pub fn verify_session_token(token: &str, secret: &SecretString) -> AppResult<SessionClaims> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.validate_aud = false;

    let token_data = decode::<SessionClaims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("test-secret-that-is-long-enough-for-hs256".to_string())
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("correct horse", 4).unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_session_token_round_trip() {
        let (token, exp) = create_session_token("user-1", "a@b.c", &secret(), 1).unwrap();
        let claims = verify_session_token(&token, &secret()).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.email, "a@b.c");
        assert_eq!(claims.iss, SESSION_ISSUER);
        assert_eq!(claims.exp, exp.timestamp() as usize);
    }

    #[test]
    fn test_session_token_rejects_wrong_secret() {
        let (token, _) = create_session_token("user-1", "a@b.c", &secret(), 1).unwrap();
        let other = SecretString::from("another-secret-entirely-different".to_string());
        let err = verify_session_token(&token, &other).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_session_token_rejects_garbage() {
        assert!(verify_session_token("not.a.jwt", &secret()).is_err());
    }
}
