//! JWT token service
//!
//! Issues and validates HS256 access tokens carrying the employee id, email
//! and access role.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret, at least 32 bytes
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load from `JWT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            secret: load_jwt_secret(lookup("JWT_SECRET")),
            expiration_minutes: lookup("JWT_EXPIRATION_MINUTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "hr-server".to_string()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "hr-clients".to_string()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id
    pub sub: String,
    pub email: String,
    /// `ADMIN` or `EMPLOYEE`
    pub role: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Malformed claims: {0}")]
    MalformedClaims(String),
}

/// Printable random secret for runs without `JWT_SECRET`
pub fn generate_printable_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=+[]{}.:;";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        tracing::error!("System RNG unavailable, falling back to a static development key");
        return "hr-server-development-key-do-not-use-in-production".to_string();
    }
    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

fn load_jwt_secret(configured: Option<String>) -> String {
    match configured {
        Some(secret) if secret.len() >= MIN_SECRET_LEN => secret,
        Some(_) => {
            tracing::warn!(
                "JWT_SECRET shorter than {MIN_SECRET_LEN} characters, using a generated key"
            );
            generate_printable_secret()
        }
        None => {
            tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
            generate_printable_secret()
        }
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

    /// Issue an access token for an employee
    pub fn generate_token(&self, employee_id: i64, email: &str, role: Role) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: employee_id.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
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

        Ok(token_data.claims)
    }

    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

/// Authenticated caller, decoded from the token
///
/// Only the id is trusted for hierarchy decisions; the engine reloads the
/// employee row on every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::MalformedClaims(format!("subject {:?}", claims.sub)))?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| JwtError::MalformedClaims(e.to_string()))?;
        Ok(Self {
            id,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
            expiration_minutes: 60,
            issuer: "hr-server".to_string(),
            audience: "hr-clients".to_string(),
        })
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let token = service
            .generate_token(42, "alice@company.com", Role::Admin)
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "alice@company.com");
        assert_eq!(claims.role, "ADMIN");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, 42);
        assert!(user.is_admin());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = service()
            .generate_token(1, "a@b.com", Role::Employee)
            .unwrap();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-key-that-is-long-enough-too".to_string(),
            ..service().config
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = service()
            .generate_token(1, "a@b.com", Role::Employee)
            .unwrap();
        let other = JwtService::with_config(JwtConfig {
            audience: "someone-else".to_string(),
            ..service().config
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_malformed_subject() {
        let claims = Claims {
            sub: "employee:1".to_string(),
            email: "a@b.com".to_string(),
            role: "ADMIN".to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: String::new(),
            aud: String::new(),
        };
        assert!(matches!(
            CurrentUser::try_from(claims),
            Err(JwtError::MalformedClaims(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_secret_from_lookup() {
        let configured = "a-configured-secret-of-at-least-32-bytes";
        let config = JwtConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some(configured.to_string()),
            "JWT_EXPIRATION_MINUTES" => Some("15".to_string()),
            _ => None,
        });
        assert_eq!(config.secret, configured);
        assert_eq!(config.expiration_minutes, 15);
        assert_eq!(config.issuer, "hr-server");

        let short = JwtConfig::from_lookup(|key| (key == "JWT_SECRET").then(|| "short".to_string()));
        assert_ne!(short.secret, "short");
        assert!(short.secret.len() >= MIN_SECRET_LEN);

        let unset = JwtConfig::from_lookup(|_| None);
        assert!(unset.secret.len() >= MIN_SECRET_LEN);
        assert_eq!(unset.expiration_minutes, 1440);
    }

    #[test]
    fn test_generated_secret_is_long_enough() {
        let a = generate_printable_secret();
        let b = generate_printable_secret();
        assert!(a.len() >= MIN_SECRET_LEN);
        assert_ne!(a, b);
    }
}
