// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::auth::models::Role;

/// Every failure the authentication flow can surface.
///
/// Clients receive a `{"message": ...}` body; internal detail (database,
/// hashing) is logged server-side and never leaks into the response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid username/email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Missing authentication token")]
    MissingToken,

    /// A stored role identifier outside the closed enumeration.
    /// Login refuses to issue tokens for such a record.
    #[error("Unknown user role: {0}")]
    UnknownRole(i16),

    #[error("Insufficient permissions: required role '{required}'")]
    InsufficientPermissions { required: Role, actual: Role },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hash error")]
    PasswordHash,

    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::UnknownRole(_) | AuthError::InsufficientPermissions { .. } => {
                StatusCode::FORBIDDEN
            }
            AuthError::Database(_)
            | AuthError::PasswordHash
            | AuthError::TokenGeneration(_)
            | AuthError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients (no sensitive data)
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_)
            | AuthError::PasswordHash
            | AuthError::TokenGeneration(_)
            | AuthError::Config(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // validator reports Rust field names; clients know the wire names
        let mut fields: Vec<&str> = errors
            .field_errors()
            .keys()
            .map(|field| match *field {
                "username_or_email" => "usernameOrEmail",
                "refresh_token" => "refreshToken",
                other => other,
            })
            .collect();
        fields.sort_unstable();
        AuthError::Validation(format!("Missing or invalid fields: {}", fields.join(", ")))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Validation(msg) => debug!("Validation failed: {}", msg),
            AuthError::InvalidCredentials => debug!("Login attempt with invalid credentials"),
            AuthError::InvalidToken => warn!("Invalid token presented"),
            AuthError::ExpiredToken => warn!("Expired token presented"),
            AuthError::MissingToken => warn!("Request to protected endpoint without token"),
            AuthError::UnknownRole(role_id) => {
                warn!("User record carries unknown role identifier {}", role_id)
            }
            AuthError::InsufficientPermissions { required, actual } => warn!(
                "Authorization failed: required role '{}', user has role '{}'",
                required, actual
            ),
            AuthError::Database(e) => error!("Database error in auth flow: {}", e),
            AuthError::PasswordHash => error!("Password hashing failure"),
            AuthError::TokenGeneration(msg) => error!("Token generation failure: {}", msg),
            AuthError::Config(msg) => error!("Auth configuration error: {}", msg),
        }

        let body = Json(json!({ "message": self.client_message() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::ExpiredToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UnknownRole(9).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::InsufficientPermissions {
                required: Role::SuperAdmin,
                actual: Role::NonTeachingEmployee,
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::PasswordHash.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_filtered_from_client_message() {
        let err = AuthError::TokenGeneration("secret key material".into());
        assert_eq!(err.client_message(), "Internal server error");

        let err = AuthError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_unknown_role_message_names_the_role() {
        let err = AuthError::UnknownRole(42);
        assert_eq!(err.client_message(), "Unknown user role: 42");
    }

    #[test]
    fn test_validation_errors_report_wire_field_names() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("username_or_email", validator::ValidationError::new("length"));
        errors.add("password", validator::ValidationError::new("length"));

        let err: AuthError = errors.into();
        assert_eq!(
            err.client_message(),
            "Missing or invalid fields: password, usernameOrEmail"
        );
    }
}
