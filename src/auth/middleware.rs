// Authentication and authorization middleware for protected routes

use axum::{
    async_trait,
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{
    error::AuthError,
    models::Role,
    token::{Claims, TokenService},
};
use crate::config::AppConfig;

/// Authenticated user extractor for protected routes
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let token = bearer_token(parts.headers.get(header::AUTHORIZATION))?;

        let claims = TokenService::new(config.jwt_secret).validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}

/// Pull the token out of a `Bearer` Authorization header value
fn bearer_token(header_value: Option<&axum::http::HeaderValue>) -> Result<&str, AuthError> {
    let value = header_value
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    value.strip_prefix("Bearer ").ok_or(AuthError::InvalidToken)
}

/// Route guard requiring a specific role.
///
/// Validates the bearer token and checks the role claim before the request
/// reaches its handler.
#[derive(Debug, Clone)]
pub struct RequireRole {
    required_role: Role,
    config: AppConfig,
}

impl RequireRole {
    pub fn new(required_role: Role, config: AppConfig) -> Self {
        Self {
            required_role,
            config,
        }
    }

    /// Guard requiring the super admin role
    pub fn super_admin(config: AppConfig) -> Self {
        Self::new(Role::SuperAdmin, config)
    }

    /// Middleware entry point
    pub async fn handle(self, request: Request<Body>, next: Next) -> Result<Response, AuthError> {
        let claims = self.authorize(&request)?;

        debug!(
            user_id = claims.sub,
            role = %claims.role,
            endpoint = request.uri().path(),
            "authorization successful"
        );
        Ok(next.run(request).await)
    }

    /// Validate the token on a request and check its role claim
    fn authorize(&self, request: &Request<Body>) -> Result<Claims, AuthError> {
        let endpoint = request.uri().path();

        let token = bearer_token(request.headers().get(header::AUTHORIZATION)).map_err(|e| {
            warn!("Rejected request to protected endpoint {}: {}", endpoint, e);
            e
        })?;

        let claims =
            TokenService::new(self.config.jwt_secret.clone()).validate_access_token(token)?;

        if claims.role != self.required_role {
            return Err(AuthError::InsufficientPermissions {
                required: self.required_role,
                actual: claims.role,
            });
        }

        Ok(claims)
    }
}
