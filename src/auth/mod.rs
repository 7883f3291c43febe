pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

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
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when the configured lifetime does not fit in a timestamp
    pub fn new(token_type: TokenType, user_id: i64, security: &SecurityConfig) -> Result<Self, JwtError> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => Duration::try_minutes(security.access_token_minutes),
            TokenType::Refresh => Duration::try_hours(security.refresh_token_hours),
        };
        let expires = lifetime
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| JwtError::TokenGeneration(format!("{:?} token lifetime out of range", token_type)))?;

        Ok(Self {
            token_type,
            user_id,
            jti: Uuid::new_v4(),
            exp: expires.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token is invalid or expired")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Token has wrong type")]
    WrongType,
}

/// Access/refresh pair returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, then require the expected token type
pub fn validate_jwt(token: &str, expected: TokenType, security: &SecurityConfig) -> Result<Claims, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    if token_data.claims.token_type != expected {
        return Err(JwtError::WrongType);
    }

    Ok(token_data.claims)
}

pub fn issue_pair(user_id: i64, security: &SecurityConfig) -> Result<TokenPair, JwtError> {
    let access = generate_jwt(&Claims::new(TokenType::Access, user_id, security)?, security)?;
    let refresh = generate_jwt(&Claims::new(TokenType::Refresh, user_id, security)?, security)?;
    Ok(TokenPair { access, refresh })
}

pub fn issue_access(user_id: i64, security: &SecurityConfig) -> Result<String, JwtError> {
    generate_jwt(&Claims::new(TokenType::Access, user_id, security)?, security)
}
