// Application configuration gathered from environment variables

use std::env;

/// Default listen port for the portal backend
pub const DEFAULT_PORT: u16 = 1804;

/// Development-only fallback signing secret.
/// Deployments must set JWT_SECRET; a warning is logged when this is used.
const DEFAULT_JWT_SECRET: &str = "portal-dev-secret-change-me";

/// Local development database, matching the connection the portal was
/// originally deployed against (local server, portal user, no password).
const DEFAULT_DATABASE_URL: &str = "postgres://portal@localhost:5432/portal_db";

/// Runtime configuration shared across handlers via application state
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to development
    /// defaults. Missing secrets are tolerated but logged loudly.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set; using the development fallback secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!("DATABASE_URL is not set; using the local development database");
            DEFAULT_DATABASE_URL.to_string()
        });

        Self {
            host,
            port,
            database_url,
            jwt_secret,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_env_is_unset() {
        env::remove_var("HOST");
        env::remove_var("JWT_SECRET");
        env::remove_var("DATABASE_URL");

        let config = AppConfig::from_env();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        env::set_var("PORT", "not-a-port");
        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        env::remove_var("PORT");
    }

    #[test]
    fn test_bind_addr_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 1804,
            database_url: String::new(),
            jwt_secret: String::new(),
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:1804");
    }
}
