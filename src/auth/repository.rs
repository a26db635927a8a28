// Database repositories for users and refresh tokens

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{RefreshToken, User},
};

/// User repository for database operations.
/// Users are provisioned out-of-band; this portal only reads them, apart
/// from `create_user` which exists for seeding and tests.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by exact username or case-insensitive email
    pub async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role_id, created_at
             FROM users
             WHERE username = $1 OR LOWER(email) = LOWER($1)",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role_id, created_at
             FROM users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users, oldest first
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role_id, created_at
             FROM users
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Insert a user record
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role_id: i16,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, role_id, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Refresh token repository.
/// Tokens are stored hashed; lookups hash the presented plaintext.
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// SHA-256 hex digest of a token
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Store a refresh token for a user
    pub async fn store_refresh_token(
        &self,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(Self::hash_token(token))
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up an unexpired refresh token by its plaintext
    pub async fn verify_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, AuthError> {
        let refresh_token = sqlx::query_as::<_, RefreshToken>(
            "SELECT id, user_id, token_hash, expires_at, created_at
             FROM refresh_tokens
             WHERE token_hash = $1 AND expires_at > NOW()",
        )
        .bind(Self::hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        Ok(refresh_token)
    }

    /// Invalidate a refresh token
    pub async fn invalidate_token(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = $1")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete expired tokens, returning how many were removed
    pub async fn delete_expired_tokens(&self) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
