mod auth;
mod config;
mod db;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{handlers, AuthResponse, AuthService, LoginRequest, RefreshRequest, RequireRole, UserResponse};
use config::AppConfig;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::refresh_handler,
        auth::handlers::logout_handler,
        auth::handlers::me_handler,
        auth::handlers::list_users_handler,
    ),
    components(
        schemas(LoginRequest, RefreshRequest, AuthResponse, UserResponse)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login, token refresh, and session endpoints"),
        (name = "users", description = "User administration endpoints")
    ),
    info(
        title = "Evaluation Portal API",
        version = "1.0.0",
        description = "Employee evaluation portal backend"
    )
)]
struct ApiDoc;

/// Registers the bearer token scheme referenced by the protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    config: AppConfig,
    auth: Arc<AuthService>,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(auth_service: Arc<AuthService>, config: AppConfig) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState {
        config: config.clone(),
        auth: auth_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let users_guard = RequireRole::super_admin(config);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/auth/login", post(handlers::login_handler))
        .route("/api/auth/refresh", post(handlers::refresh_handler))
        .route("/api/auth/logout", post(handlers::logout_handler))
        .route("/api/auth/me", get(handlers::me_handler))
        .route(
            "/api/users",
            get(handlers::list_users_handler).layer(middleware::from_fn(
                move |req: axum::extract::Request, next: middleware::Next| {
                    let guard = users_guard.clone();
                    async move { guard.handle(req, next).await }
                },
            )),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Evaluation Portal API - Starting...");

    let config = AppConfig::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let auth_service = Arc::new(AuthService::new(db_pool, config.jwt_secret.clone()));

    // Drop refresh tokens that expired while the server was down
    let purged = auth_service
        .purge_expired_tokens()
        .await
        .expect("Failed to purge expired refresh tokens");
    if purged > 0 {
        tracing::info!("Purged {} expired refresh tokens", purged);
    }

    let app = create_router(auth_service, config.clone());

    // Start the Axum server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Evaluation Portal API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
