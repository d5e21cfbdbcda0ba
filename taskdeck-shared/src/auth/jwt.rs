/// Token issuance and validation
///
/// Tokens are signed with HS256 (HMAC-SHA256) and embed the public user
/// projection next to the standard claims, so the HTTP layer can identify
/// the caller without a storage round trip.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Validation**: Signature, expiration, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use taskdeck_shared::auth::jwt::TokenIssuer;
/// use taskdeck_shared::models::user::{CreateUser, User, UserPublic};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issuer = TokenIssuer::new("test-secret-key-at-least-32-bytes!!", Duration::hours(24));
/// let user = UserPublic::from(User::new(CreateUser {
///     email: "user@example.com".to_string(),
///     username: None,
///     password_hash: "$argon2id$...".to_string(),
///     full_name: "Jane Doe".to_string(),
/// }));
///
/// let token = issuer.issue(&user)?;
/// let claims = issuer.validate(&token)?;
/// assert_eq!(claims.sub, user.id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserPublic;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign token
    #[error("Failed to sign token: {0}")]
    Sign(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token failed validation
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Token claims
///
/// Standard claims (`sub`, `iss`, `iat`, `exp`) plus the public user
/// projection as a custom claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Public user projection (custom claim)
    pub user: UserPublic,
}

/// Signs and validates HS256 tokens with a fixed issuer and TTL
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Issuer claim stamped into every token
    pub const ISSUER: &'static str = "taskdeck";

    /// Creates an issuer from a signing secret and token lifetime
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issues a signed token embedding the public user projection
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if encoding fails
    pub fn issue(&self, user: &UserPublic) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            iss: Self::ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            user: user.clone(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Sign(e.to_string()))
    }

    /// Validates a token's signature, expiry, and issuer
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for expired tokens and
    /// `TokenError::Invalid` for every other validation failure
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[Self::ISSUER]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{CreateUser, User};

    const SECRET: &str = "test-secret-key-at-least-32-bytes!!";

    fn sample_user() -> UserPublic {
        UserPublic::from(User::new(CreateUser {
            email: "user@example.com".to_string(),
            username: Some("jdoe".to_string()),
            password_hash: "hash".to_string(),
            full_name: "Jane Doe".to_string(),
        }))
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(24));
        let user = sample_user();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.validate(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.iss, TokenIssuer::ISSUER);
        assert_eq!(claims.user, user);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(24));
        let other = TokenIssuer::new("another-secret-key-at-least-32-bytes", Duration::hours(24));

        let token = issuer.issue(&sample_user()).unwrap();
        assert!(matches!(
            other.validate(&token).unwrap_err(),
            TokenError::Invalid(_)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative TTL puts the expiry well past the default leeway.
        let issuer = TokenIssuer::new(SECRET, Duration::hours(-2));
        let token = issuer.issue(&sample_user()).unwrap();
        assert!(matches!(
            issuer.validate(&token).unwrap_err(),
            TokenError::Expired
        ));
    }
}
