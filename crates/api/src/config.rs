use steeple_engine::context::DEFAULT_QUIET_HOURS_UTC_OFFSET;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
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
    /// Slack webhook URL for moderation alerts; alerts are skipped when unset.
    pub slack_webhook_url: Option<String>,
    /// UTC offset, in whole hours, for quiet-hour evaluation (default: `9`).
    pub quiet_hours_utc_offset: i8,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `SLACK_WEBHOOK_URL`      | unset                   |
    /// | `QUIET_HOURS_UTC_OFFSET` | `9`                     |
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
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let slack_webhook_url = std::env::var("SLACK_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let quiet_hours_utc_offset: i8 = std::env::var("QUIET_HOURS_UTC_OFFSET")
            .unwrap_or_else(|_| DEFAULT_QUIET_HOURS_UTC_OFFSET.to_string())
            .parse()
            .expect("QUIET_HOURS_UTC_OFFSET must be a valid i8");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            slack_webhook_url,
            quiet_hours_utc_offset,
            jwt,
        }
    }
}
