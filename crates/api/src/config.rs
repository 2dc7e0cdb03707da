use carefully_core::session::DEFAULT_TURN_TARGET;

use crate::auth::jwt::JwtConfig;

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
    /// HTTP request timeout in seconds (default: `60`).
    ///
    /// Must leave room for two sequential generation calls within one
    /// conversation request.
    pub request_timeout_secs: u64,
    /// Number of turns that make up a full session (default: `3`).
    /// Drives the derived progress percentage.
    pub session_turn_target: u32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                    |
    /// |-----------------------|----------------------------|
    /// | `HOST`                | `0.0.0.0`                  |
    /// | `PORT`                | `3000`                     |
    /// | `CORS_ORIGINS`        | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`| `60`                       |
    /// | `SESSION_TURN_TARGET` | `3`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_turn_target: u32 = std::env::var("SESSION_TURN_TARGET")
            .unwrap_or_else(|_| DEFAULT_TURN_TARGET.to_string())
            .parse()
            .expect("SESSION_TURN_TARGET must be a valid u32");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_turn_target,
            jwt,
        }
    }
}
