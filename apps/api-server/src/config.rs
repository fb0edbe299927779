//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` when no database variable is set; the server then runs in memory.
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub telemetry: TelemetryConfig,
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn truthy(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let configured = ["DATABASE_URL", "POSTGRES_HOST", "POSTGRES_USER"]
            .iter()
            .any(|key| lookup(key).is_some());

        let database = configured.then(|| {
            let defaults = DatabaseConfig::default();
            DatabaseConfig {
                url: lookup("DATABASE_URL"),
                host: lookup("POSTGRES_HOST").unwrap_or(defaults.host),
                port: parse_or(&lookup, "POSTGRES_PORT", defaults.port),
                database: lookup("POSTGRES_DB").unwrap_or(defaults.database),
                username: lookup("POSTGRES_USER"),
                password: lookup("POSTGRES_PASSWORD"),
                command_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_COMMAND_TIMEOUT_SECS",
                    defaults.command_timeout.as_secs(),
                )),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections),
            }
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            run_migrations: truthy(lookup("RUN_MIGRATIONS")),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}
