//! Session tokens.
//!
//! A session is an HS256-signed JWT carrying [`Claims`]. Tokens are
//! stateless: logout only clears the cookie, and a token stays valid until
//! `exp` unless its user disappears (the auth extractor re-reads the user).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use atelier_core::types::DbId;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role name (e.g. `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

/// Default session lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Session lifetime in seconds, as reported to clients.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token(42, "admin", &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "admin".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_hours: 1,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_hours: 1,
        };

        let token = generate_token(1, "admin", &config_a).expect("token generation should succeed");
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(validate_token("not.a.jwt", &test_config()).is_err());
    }
}
