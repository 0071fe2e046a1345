use std::str::FromStr;

use crate::auth::jwt::JwtConfig;
use crate::geo::GeoConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long open connections may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Shared secret for `/api/init`. `None` disables the endpoint.
    pub init_secret: Option<String>,
    /// Mark the session cookie `Secure` (default: `false`).
    pub cookie_secure: bool,
    /// Fallback credentials for `POST /api/init` when the body has none.
    pub bootstrap_admin: Option<AdminCredentials>,
    /// Session token configuration.
    pub jwt: JwtConfig,
    /// Visitor geolocation lookup.
    pub geo: GeoConfig,
}

/// Administrator credentials supplied through the environment.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminCredentials {
    /// Read `ADMIN_EMAIL`, `ADMIN_PASSWORD` and `ADMIN_NAME` (default
    /// `Administrator`). Returns `None` unless both email and password are set.
    pub fn from_env() -> Option<Self> {
        let email = non_empty_var("ADMIN_EMAIL")?;
        let password = non_empty_var("ADMIN_PASSWORD")?;
        let name = non_empty_var("ADMIN_NAME").unwrap_or_else(|| "Administrator".into());
        Some(Self {
            email,
            password,
            name,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `INIT_SECRET`          | unset (endpoint disabled)  |
    /// | `COOKIE_SECURE`        | `false`                    |
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_var("PORT", 3000),
            cors_origins,
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parsed_var("SHUTDOWN_TIMEOUT_SECS", 30),
            init_secret: non_empty_var("INIT_SECRET"),
            cookie_secure: parsed_var("COOKIE_SECURE", false),
            bootstrap_admin: AdminCredentials::from_env(),
            jwt: JwtConfig::from_env(),
            geo: GeoConfig::from_env(),
        }
    }
}

/// Parse `key` when set, else use `default`.
///
/// # Panics
///
/// Panics when the variable is set but does not parse as `T`.
fn parsed_var<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} is invalid ({raw:?}): {e}")),
        Err(_) => default,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
