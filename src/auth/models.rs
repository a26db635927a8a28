// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::error::AuthError;

/// Portal roles, stored in the database as integer identifiers.
///
/// Identifiers 1 and 3 are both teaching evaluators in name, but they are
/// distinct roles that land on different pages: 1 is the admin-side
/// evaluator, 3 the client-side one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Role {
    TeachingEvaluator,
    NonTeachingEvaluator,
    ClientTeachingEvaluator,
    NonTeachingEmployee,
    SuperAdmin,
}

impl Role {
    /// All roles the portal knows about
    pub const ALL: [Role; 5] = [
        Role::TeachingEvaluator,
        Role::NonTeachingEvaluator,
        Role::ClientTeachingEvaluator,
        Role::NonTeachingEmployee,
        Role::SuperAdmin,
    ];

    /// Integer identifier as stored in `users.role_id`
    pub fn id(self) -> i16 {
        match self {
            Role::TeachingEvaluator => 1,
            Role::NonTeachingEvaluator => 2,
            Role::ClientTeachingEvaluator => 3,
            Role::NonTeachingEmployee => 4,
            Role::SuperAdmin => 5,
        }
    }

    /// Post-login landing page for this role.
    /// Each role maps to exactly one target.
    pub fn redirect_target(self) -> &'static str {
        match self {
            Role::TeachingEvaluator => "/evaluator/teaching.html",
            Role::NonTeachingEvaluator => "/evaluator/non-teaching.html",
            Role::ClientTeachingEvaluator => "/client/teaching.html",
            Role::NonTeachingEmployee => "/employee/non-teaching.html",
            Role::SuperAdmin => "/admin/dashboard.html",
        }
    }
}

impl TryFrom<i16> for Role {
    type Error = AuthError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::TeachingEvaluator),
            2 => Ok(Role::NonTeachingEvaluator),
            3 => Ok(Role::ClientTeachingEvaluator),
            4 => Ok(Role::NonTeachingEmployee),
            5 => Ok(Role::SuperAdmin),
            other => Err(AuthError::UnknownRole(other)),
        }
    }
}

impl From<Role> for i16 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::TeachingEvaluator => "teaching_evaluator",
            Role::NonTeachingEvaluator => "nonteaching_evaluator",
            Role::ClientTeachingEvaluator => "client_teaching_evaluator",
            Role::NonTeachingEmployee => "nonteaching_employee",
            Role::SuperAdmin => "super_admin",
        };
        write!(f, "{}", label)
    }
}

/// User database model.
/// `role_id` is kept raw so records with out-of-range identifiers can be
/// surfaced as an explicit error instead of a decode failure.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i16,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Resolve the stored role identifier against the closed enumeration
    pub fn role(&self) -> Result<Role, AuthError> {
        Role::try_from(self.role_id)
    }
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role_id: i16,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role_id: user.role_id,
            created_at: user.created_at,
        }
    }
}

/// Refresh token database model
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i32,
    pub user_id: i32,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "usernameOrEmail")]
    #[validate(length(min = 1))]
    pub username_or_email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token refresh / logout request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Authentication response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role_id: i16) -> User {
        User {
            id: 7,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_every_role_maps_to_its_fixed_redirect_target() {
        let expected = [
            (1, "/evaluator/teaching.html"),
            (2, "/evaluator/non-teaching.html"),
            (3, "/client/teaching.html"),
            (4, "/employee/non-teaching.html"),
            (5, "/admin/dashboard.html"),
        ];

        for (id, target) in expected {
            let role = Role::try_from(id).unwrap();
            assert_eq!(role.id(), id);
            assert_eq!(role.redirect_target(), target);
        }
    }

    #[test]
    fn test_redirect_targets_are_distinct() {
        for a in Role::ALL {
            for b in Role::ALL {
                if a != b {
                    assert_ne!(a.redirect_target(), b.redirect_target());
                }
            }
        }
    }

    #[test]
    fn test_unknown_role_identifiers_are_rejected() {
        for id in [0i16, -1, 6, 42, i16::MAX] {
            let err = Role::try_from(id).unwrap_err();
            assert!(matches!(err, AuthError::UnknownRole(v) if v == id));
        }
    }

    #[test]
    fn test_user_role_resolution() {
        assert_eq!(sample_user(5).role().unwrap(), Role::SuperAdmin);
        assert!(sample_user(6).role().is_err());
    }

    #[test]
    fn test_login_request_uses_camel_case_identifier_field() {
        let json = r#"{"usernameOrEmail": "jdoe", "password": "secret"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username_or_email, "jdoe");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_auth_response_wire_format() {
        let response = AuthResponse {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
            user: sample_user(3).into(),
        };

        let value = serde_json::to_value(&response).unwrap();
        let object = value.as_object().unwrap();

        // Exactly the three values the client persists
        assert_eq!(object.len(), 3);
        assert_eq!(object["accessToken"], "acc");
        assert_eq!(object["refreshToken"], "ref");
        assert_eq!(object["user"]["id"], 7);
        assert_eq!(object["user"]["username"], "jdoe");
        assert_eq!(object["user"]["role_id"], 3);
        assert!(object["user"].get("password_hash").is_none());
    }

    #[test]
    fn test_role_serializes_as_integer() {
        let json = serde_json::to_string(&Role::ClientTeachingEvaluator).unwrap();
        assert_eq!(json, "3");

        let role: Role = serde_json::from_str("5").unwrap();
        assert_eq!(role, Role::SuperAdmin);

        assert!(serde_json::from_str::<Role>("9").is_err());
    }
}
