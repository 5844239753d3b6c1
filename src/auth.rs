//! Session tokens and password hashing.
//!
//! The identity cookie stores a signed JWT with the [`AuthenticatedUser`]
//! claims. Password hashes are Argon2id PHC strings.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::models::config::ServerConfig;

/// How long a sign-in stays valid.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hash(err.to_string()))
}

/// Checks `password` against a PHC hash; `Ok(false)` on mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|err| AuthError::MalformedHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl AuthenticatedUser {
    /// Claims for a fresh session of `user`.
    pub fn for_user(user: &User) -> Self {
        let exp = Utc::now() + Duration::days(SESSION_TTL_DAYS);
        Self {
            sub: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            exp: exp.timestamp().max(0) as usize,
        }
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, AuthError> {
        Ok(encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?)
    }

    /// Verifies the signature and expiry of `token`.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, AuthError> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(ErrorInternalServerError("server misconfigured")));
        };

        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|token| AuthenticatedUser::from_jwt(&token, &config.secret).ok())
            .ok_or_else(|| ErrorUnauthorized("unauthorized"));

        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("s3cretpass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cretpass", &hash).unwrap());
        assert!(!verify_password("wrongpass1", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("whatever", "plaintext"),
            Err(AuthError::MalformedHash(_))
        ));
    }

    #[test]
    fn token_round_trip() {
        let claims = AuthenticatedUser {
            sub: "5".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = claims.to_jwt(SECRET).unwrap();
        assert_eq!(AuthenticatedUser::from_jwt(&token, SECRET).unwrap(), claims);
        assert!(AuthenticatedUser::from_jwt(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = AuthenticatedUser {
            sub: "5".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let token = claims.to_jwt(SECRET).unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, SECRET).is_err());
    }
}
