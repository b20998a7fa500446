//! Application settings loaded from environment variables.

use std::env;
use std::fmt;

use super::constants::{
    APP_ENV_PRODUCTION, APP_ENV_TEST, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, TEST_DATABASE_URL,
};

/// Deployment mode of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
    /// Ephemeral mode: the users table is wiped on startup.
    Test,
}

impl AppEnv {
    /// Parse an `APP_ENV` value. Unknown values fall back to development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            APP_ENV_TEST => AppEnv::Test,
            APP_ENV_PRODUCTION => AppEnv::Production,
            _ => AppEnv::Development,
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, AppEnv::Test)
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Development => write!(f, "development"),
            AppEnv::Production => write!(f, "production"),
            AppEnv::Test => write!(f, "test"),
        }
    }
}

/// Everything the store needs to open its connection.
///
/// Built from [`Config`] at startup so the store never reads the environment.
#[derive(Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    /// Clear all rows (and the id sequence) right after the schema is ensured.
    pub reset_on_start: bool,
}

impl DatabaseOptions {
    /// Options for a fresh, private in-memory SQLite store.
    pub fn in_memory() -> Self {
        Self {
            url: TEST_DATABASE_URL.to_string(),
            max_connections: 1,
            reset_on_start: true,
        }
    }

    /// Whether the whole store lives inside its connection.
    pub fn is_in_memory(&self) -> bool {
        is_in_memory_sqlite(&self.url)
    }
}

impl fmt::Debug for DatabaseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseOptions")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("reset_on_start", &self.reset_on_start)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or_default();

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            if app_env.is_test() {
                TEST_DATABASE_URL.to_string()
            } else {
                DEFAULT_DATABASE_URL.to_string()
            }
        });

        // An in-memory SQLite database lives inside a single connection
        let database_max_connections = if is_in_memory_sqlite(&database_url) {
            1
        } else {
            lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
        };

        Self {
            app_env,
            database_url,
            database_max_connections,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup("SERVER_PORT")
                .or_else(|| lookup("EXPRESS_PORT"))
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Store options derived from this configuration.
    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            reset_on_start: self.app_env.is_test(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite") && (url.contains(":memory:") || url.contains("mode=memory"))
}
