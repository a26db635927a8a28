// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{AuthResponse, LoginRequest, RefreshRequest, UserResponse},
    service::AuthService,
};

/// Login with username or email
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, token pair issued", body = AuthResponse),
        (status = 400, description = "Missing or empty fields"),
        (status = 401, description = "Invalid username/email or password"),
        (status = 403, description = "User record carries an unknown role"),
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    // Reject empty fields before touching the database
    request.validate()?;

    let response = service
        .login(&request.username_or_email, &request.password)
        .await?;

    Ok(Json(response))
}

/// Rotate a refresh token
/// POST /api/auth/refresh
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = AuthResponse),
        (status = 401, description = "Unknown or expired refresh token"),
    ),
    tag = "auth"
)]
pub async fn refresh_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = service.refresh(&request.refresh_token).await?;
    Ok(Json(response))
}

/// Invalidate a refresh token
/// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshRequest,
    responses(
        (status = 204, description = "Token invalidated (idempotent)"),
    ),
    tag = "auth"
)]
pub async fn logout_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<RefreshRequest>,
) -> Result<StatusCode, AuthError> {
    service.logout(&request.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current user information
/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user record", body = UserResponse),
        (status = 401, description = "Missing, malformed, or expired token"),
    ),
    security(("bearer_token" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    State(service): State<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let response = service.current_user(user.user_id).await?;
    Ok(Json(response))
}

/// List all users (super admin only; guarded by RequireRole)
/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All user records", body = Vec<UserResponse>),
        (status = 401, description = "Missing, malformed, or expired token"),
        (status = 403, description = "Authenticated but not a super admin"),
    ),
    security(("bearer_token" = [])),
    tag = "users"
)]
pub async fn list_users_handler(
    State(service): State<Arc<AuthService>>,
) -> Result<Json<Vec<UserResponse>>, AuthError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}
