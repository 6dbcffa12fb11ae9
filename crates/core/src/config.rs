//! Runtime configuration collected from the environment.

use crate::env_config::{env_parse_with_default, env_string_with_default};

/// Default push API endpoint for proactive notifications.
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://actions.googleapis.com/v2/conversations:send";

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string (`TIPLINE_DATABASE_URL`).
    pub database_url: String,
    /// Push API endpoint the dispatcher POSTs notifications to
    /// (`TIPLINE_PUSH_ENDPOINT`).
    pub push_endpoint: String,
    /// Path to the service-account key JSON used for the token exchange
    /// (`TIPLINE_SERVICE_ACCOUNT`).
    pub service_account_path: String,
    /// Whether pushes are flagged as sandbox sends (`TIPLINE_SANDBOX`).
    pub sandbox: bool,
    /// HTTP bind host (`TIPLINE_HOST`).
    pub host: String,
    /// HTTP bind port (`TIPLINE_PORT`).
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment with sensible defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env_string_with_default(
                "TIPLINE_DATABASE_URL",
                "postgres://localhost/tipline",
            ),
            push_endpoint: env_string_with_default(
                "TIPLINE_PUSH_ENDPOINT",
                DEFAULT_PUSH_ENDPOINT,
            ),
            service_account_path: env_string_with_default(
                "TIPLINE_SERVICE_ACCOUNT",
                "service-account.json",
            ),
            sandbox: env_parse_with_default("TIPLINE_SANDBOX", true),
            host: env_string_with_default("TIPLINE_HOST", "127.0.0.1"),
            port: env_parse_with_default("TIPLINE_PORT", 8080),
        }
    }
}
