//! Access/refresh token pairs.
//!
//! Both tokens are HS256-signed JWTs carrying a [`Claims`] payload, each signed
//! with its own secret. Only the SHA-256 digest of a token is persisted
//! server-side (see [`hash_token`]), so a database leak does not expose live
//! sessions.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kredit_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT claims embedded in both tokens of a pair.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the customer's public UUID.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier, so two pairs minted in the same second differ.
    pub jti: String,
}

impl Claims {
    /// The customer UUID in `sub`, if it parses.
    pub fn customer_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Configuration for token minting and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in minutes (default: 10080, one week).
    pub refresh_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in minutes.
const DEFAULT_REFRESH_EXPIRY_MINS: i64 = 7 * 24 * 60;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_ACCESS_SECRET`        | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_MINS`  | no       | `10080` |
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or empty, or if the two are equal.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .expect("JWT_ACCESS_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "JWT_ACCESS_SECRET must not be empty");

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .expect("JWT_REFRESH_SECRET must be set in the environment");
        assert!(!refresh_secret.is_empty(), "JWT_REFRESH_SECRET must not be empty");
        assert_ne!(
            access_secret, refresh_secret,
            "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ"
        );

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_mins: i64 = std::env::var("JWT_REFRESH_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_MINS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_mins,
        }
    }
}

/// A freshly minted token pair with expiry instants in Unix seconds.
#[derive(Debug, Clone, Serialize)]
pub struct TokenDetails {
    pub access_token: String,
    pub refresh_token: String,
    pub at_expires: i64,
    pub rt_expires: i64,
}

impl TokenDetails {
    pub fn access_expires_at(&self) -> Timestamp {
        DateTime::from_timestamp(self.at_expires, 0).unwrap_or_else(Utc::now)
    }

    pub fn refresh_expires_at(&self) -> Timestamp {
        DateTime::from_timestamp(self.rt_expires, 0).unwrap_or_else(Utc::now)
    }
}

/// Mint an access/refresh pair for the given customer.
pub fn generate_token_pair(
    customer_uuid: Uuid,
    config: &JwtConfig,
) -> Result<TokenDetails, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let (access_token, at_expires) = sign(
        customer_uuid,
        now,
        config.access_token_expiry_mins,
        &config.access_secret,
    )?;
    let (refresh_token, rt_expires) = sign(
        customer_uuid,
        now,
        config.refresh_token_expiry_mins,
        &config.refresh_secret,
    )?;

    Ok(TokenDetails {
        access_token,
        refresh_token,
        at_expires,
        rt_expires,
    })
}

fn sign(
    customer_uuid: Uuid,
    now: i64,
    expiry_mins: i64,
    secret: &str,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let exp = now + expiry_mins * 60;
    let claims = Claims {
        sub: customer_uuid.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

/// Validate an access token's signature and expiry.
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, &config.access_secret)
}

/// Validate a refresh token's signature and expiry.
pub fn validate_refresh_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, &config.refresh_secret)
}

fn validate(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// SHA-256 hex digest of a token, as stored in `customer_tokens`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
