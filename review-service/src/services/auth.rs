use crate::models::storage::User;
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Expected a {expected:?} token, got {found:?}")]
    WrongTokenType { expected: TokenType, found: TokenType },
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Hashes `password` with Argon2id and a fresh salt, in PHC string format.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Unparseable stored hashes never verify.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    PasswordHash::new(encoded)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    pub user_id: i64,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signs and checks HS256 bearer tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Returns `(access, refresh)` for `user`.
    pub fn issue_pair(&self, user: &User) -> Result<(String, String), AuthError> {
        let access = self.issue(TokenType::Access, user.id, &user.username)?;
        let refresh = self.issue(TokenType::Refresh, user.id, &user.username)?;
        Ok((access, refresh))
    }

    /// Exchanges a valid refresh token for a new access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        self.issue(TokenType::Access, claims.user_id, &claims.username)
    }

    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())?.claims;
        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected,
                found: claims.token_type,
            });
        }
        Ok(claims)
    }

    fn issue(&self, token_type: TokenType, user_id: i64, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            token_type,
            user_id,
            username: username.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }
}
