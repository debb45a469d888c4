//! JWT token service
//!
//! Issues and verifies the signed session token stored in the `auth-token`
//! cookie.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::Role;
use thiserror::Error;

/// Minimum accepted secret length
const MIN_SECRET_LEN: usize = 32;

/// Default token lifetime (7 days)
const DEFAULT_EXPIRATION_MINUTES: i64 = 7 * 24 * 60;

/// Longest accepted token lifetime (one year)
const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`, `JWT_AUDIENCE`
    ///
    /// Outside production a missing secret is replaced by a random one, which
    /// invalidates every session on restart.
    pub fn from_env(is_production: bool) -> Result<Self, JwtError> {
        let secret = load_jwt_secret(std::env::var("JWT_SECRET").ok(), is_production)?;
        let expiration_minutes = parse_expiration_minutes(
            std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        )?;

        Ok(Self {
            secret,
            expiration_minutes,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "hr-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "hr-web".to_string()),
        })
    }

    /// Config with a fresh random secret and default claims
    pub fn ephemeral() -> Self {
        Self {
            secret: generate_secure_printable_jwt_secret(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            issuer: "hr-server".to_string(),
            audience: "hr-web".to_string(),
        }
    }
}

/// Identity and role facts carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaim {
    /// User id
    pub sub: String,
    pub email: String,
    /// Display name
    pub name: String,
    pub role: Role,
}

/// Wire claims: the session claim plus registered claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    role: Role,
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
}

impl From<Claims> for SessionClaim {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable random secret (64 chars)
pub fn generate_secure_printable_jwt_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        // fall back to a per-process value rather than a fixed string
        return format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
    }

    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

fn load_jwt_secret(raw: Option<String>, is_production: bool) -> Result<String, JwtError> {
    match raw {
        Some(secret) if secret.len() >= MIN_SECRET_LEN => Ok(secret),
        Some(_) => Err(JwtError::ConfigError(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_SECRET_LEN
        ))),
        None if is_production => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable must be set in production".to_string(),
        )),
        None => {
            tracing::warn!("JWT_SECRET not set, generating a temporary secret for this process");
            Ok(generate_secure_printable_jwt_secret())
        }
    }
}

/// Token lifetime from `JWT_EXPIRATION_MINUTES`, 1 minute to 1 year
fn parse_expiration_minutes(raw: Option<String>) -> Result<i64, JwtError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_EXPIRATION_MINUTES);
    };

    match raw.trim().parse::<i64>() {
        Ok(minutes) if (1..=MAX_EXPIRATION_MINUTES).contains(&minutes) => Ok(minutes),
        _ => Err(JwtError::ConfigError(format!(
            "JWT_EXPIRATION_MINUTES must be between 1 and {}, got {:?}",
            MAX_EXPIRATION_MINUTES, raw
        ))),
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for `claim`, valid from now for the configured lifetime
    pub fn issue(&self, claim: &SessionClaim) -> Result<String, JwtError> {
        self.issue_at(claim, Utc::now())
    }

    /// Sign a token as if issued at `now`
    pub fn issue_at(&self, claim: &SessionClaim, now: DateTime<Utc>) -> Result<String, JwtError> {
        let expiration = Duration::try_minutes(self.config.expiration_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::GenerationFailed(format!(
                    "token lifetime of {} minutes is out of range",
                    self.config.expiration_minutes
                ))
            })?;

        let claims = Claims {
            sub: claim.sub.clone(),
            email: claim.email.clone(),
            name: claim.name.clone(),
            role: claim.role,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Check signature, expiry, issuer and audience, then decode the claim
    pub fn verify(&self, token: &str) -> Result<SessionClaim, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims.into())
    }

    /// Token lifetime in seconds (cookie `Max-Age`)
    pub fn ttl_seconds(&self) -> i64 {
        self.config.expiration_minutes.saturating_mul(60)
    }

    /// Strip the `Bearer ` prefix of an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}
