/**
 * Identity Provider
 *
 * Password hashing (bcrypt) and session tokens (HS256 JWTs). A login issues
 * two tokens: a short-lived access token used as `Authorization: Bearer`, and
 * a long-lived refresh token. Only access tokens are accepted by
 * `verify_session`.
 */
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::config::AppConfig;
use crate::shared::models::{Role, User};

/// Which of the two session tokens a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    pub typ: TokenKind,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Tokens handed out on login
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
}

/// Identity provider errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized: No token provided")]
    MissingToken,

    #[error("Unauthorized: Invalid token")]
    InvalidToken(String),

    #[error("Unauthorized: User not found")]
    UnknownUser,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Failures of the server rather than of the caller's credentials
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Hashing(_) | Self::Signing(_))
    }
}

/// Issues and verifies sessions, hashes and checks passwords
#[derive(Clone)]
pub struct IdentityProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
    bcrypt_cost: u32,
}

impl IdentityProvider {
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_secs: u64, bcrypt_cost: u32) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
            config.bcrypt_cost,
        )
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Issue an access/refresh token pair for `user`
    pub fn issue_session(&self, user: &User) -> Result<SessionTokens, AuthError> {
        let now = Utc::now();
        let access_token = self.sign(user, TokenKind::Access, now, self.access_ttl_secs)?;
        let refresh_token = self.sign(user, TokenKind::Refresh, now, self.refresh_ttl_secs)?;
        let expires_at = Utc
            .timestamp_opt(now.timestamp() + self.access_ttl_secs as i64, 0)
            .single()
            .unwrap_or(now);
        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Verify an access token and return the user id it names
    pub fn verify_session(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;
        if claims.typ != TokenKind::Access {
            return Err(AuthError::InvalidToken("not an access token".to_string()));
        }
        Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn sign(&self, user: &User, typ: TokenKind, now: DateTime<Utc>, ttl_secs: u64) -> Result<String, AuthError> {
        let iat = now.timestamp().max(0) as u64;
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            typ,
            exp: iat + ttl_secs,
            iat,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| AuthError::Signing(e.to_string()))
    }
}
