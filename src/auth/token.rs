// Access token (JWT) and refresh token issuance and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::auth::{error::AuthError, models::Role};

/// Access tokens live for 15 minutes
pub const ACCESS_TOKEN_TTL_SECS: i64 = 900;

/// Refresh tokens live for 7 days
pub const REFRESH_TOKEN_TTL_SECS: i64 = 604_800;

/// Length of the opaque refresh token string
const REFRESH_TOKEN_LEN: usize = 64;

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Token service for issuing and validating session credentials.
///
/// Access tokens are signed JWTs; refresh tokens are opaque random strings
/// whose validity lives server-side (stored hashed with an expiry).
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Generate a signed access token for the given user identity
    pub fn generate_access_token(
        &self,
        user_id: i32,
        username: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role,
            iat: now,
            exp: now + ACCESS_TOKEN_TTL_SECS,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }

    /// Generate an opaque refresh token
    pub fn generate_refresh_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LEN)
            .map(char::from)
            .collect()
    }

    /// Expiry timestamp for a refresh token issued now
    pub fn refresh_token_expiry() -> DateTime<Utc> {
        Utc::now() + Duration::seconds(REFRESH_TOKEN_TTL_SECS)
    }
}
