// Authentication service - business logic layer

use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, User, UserResponse},
    password::PasswordService,
    repository::{TokenRepository, UserRepository},
    token::TokenService,
};

/// Authentication service coordinating repositories and token issuance
pub struct AuthService {
    users: UserRepository,
    tokens: TokenRepository,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_secret: String) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            tokens: TokenRepository::new(pool),
            token_service: TokenService::new(jwt_secret),
        }
    }

    /// Validate credentials and issue a token pair.
    ///
    /// A user record whose role identifier falls outside the known set is
    /// refused before any token is issued or persisted.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let role = user.role()?;
        tracing::info!(
            user_id = user.id,
            role = %role,
            redirect = role.redirect_target(),
            "login succeeded"
        );

        self.issue_tokens(user).await
    }

    /// Rotate a refresh token: the presented token is invalidated and a
    /// fresh pair is issued for its owner.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AuthError> {
        let stored = self
            .tokens
            .verify_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(stored.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // Resolve the role before invalidating anything, so a bad record
        // leaves the presented token untouched.
        user.role()?;

        self.tokens.invalidate_token(refresh_token).await?;

        tracing::debug!(user_id = user.id, "refresh token rotated");
        self.issue_tokens(user).await
    }

    /// Invalidate a refresh token. Unknown tokens are a no-op.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.tokens.invalidate_token(refresh_token).await
    }

    /// Fetch the current user record for an authenticated request
    pub async fn current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(user.into())
    }

    /// List all users (password hashes excluded)
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AuthError> {
        let users = self.users.list_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Purge expired refresh tokens, returning how many were removed
    pub async fn purge_expired_tokens(&self) -> Result<u64, AuthError> {
        self.tokens.delete_expired_tokens().await
    }

    async fn issue_tokens(&self, user: User) -> Result<AuthResponse, AuthError> {
        let role = user.role()?;

        let access_token =
            self.token_service
                .generate_access_token(user.id, &user.username, role)?;

        let refresh_token = TokenService::generate_refresh_token();
        self.tokens
            .store_refresh_token(user.id, &refresh_token, TokenService::refresh_token_expiry())
            .await?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }
}
