//! JWT token service
//!
//! Issues and validates the bearer tokens carried by every authenticated
//! request.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::Role;
use thiserror::Error;

use crate::db::models::User;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes; doubles as the absolute session cap
    pub expiration_minutes: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; generating a per-process secret (sessions will not survive restarts)");
            generate_secret()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480), // 8 hours
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "onboard-server".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// Authenticated caller context resolved from a validated token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Generate a random hex-encoded 256-bit secret
fn generate_secret() -> String {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    // SystemRandom failure means the OS RNG is broken; nothing to recover
    rng.fill(&mut key).expect("OS random generator unavailable");
    key.iter().map(|b| format!("{:02x}", b)).collect()
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    config: JwtConfig,
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Issue a token for a verified user
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let user_id = user
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| JwtError::GenerationFailed("User has no id".to_string()))?;

        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: user.email.clone(),
            role: user.role,
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
            _ => JwtError::InvalidToken(e.to_string()),
        })
    }

    /// Extract the token from an `Authorization: Bearer <token>` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            expiration_minutes: 60,
            issuer: "onboard-server".to_string(),
        })
    }

    fn test_user(role: Role) -> User {
        User {
            id: Some("user:abc".parse().unwrap()),
            email: "ana@example.edu".to_string(),
            password_hash: String::new(),
            role,
            created_at: 0,
        }
    }

    #[test]
    fn round_trip_preserves_identity() {
        let service = test_service();
        let token = service.generate_token(&test_user(Role::Trainer)).unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.email, "ana@example.edu");
        assert_eq!(claims.role, Role::Trainer);

        let user = CurrentUser::from(claims);
        assert!(!user.role.is_admin());
    }

    #[test]
    fn tampered_token_rejected() {
        let service = test_service();
        let token = service.generate_token(&test_user(Role::ItManager)).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(matches!(
            service.validate_token(&tampered),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn wrong_secret_rejected() {
        let service = test_service();
        let token = service.generate_token(&test_user(Role::Trainer)).unwrap();

        let other = JwtService::new(JwtConfig {
            secret: "another-secret-another-secret-another".to_string(),
            expiration_minutes: 60,
            issuer: "onboard-server".to_string(),
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
