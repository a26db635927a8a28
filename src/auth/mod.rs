// Authentication module
// JWT-based login with opaque refresh tokens and role-based dispatch

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{
    list_users_handler, login_handler, logout_handler, me_handler, refresh_handler,
};
pub use middleware::{AuthenticatedUser, RequireRole};
pub use models::{AuthResponse, LoginRequest, RefreshRequest, Role, User, UserResponse};
pub use service::AuthService;
