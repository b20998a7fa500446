//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

use std::time::Duration;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Mount point of the user CRUD routes
pub const USERS_ROUTE_PREFIX: &str = "/api/users";

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (file-backed SQLite, created if missing)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";

/// Database URL used in test mode when none is configured
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Lifetime and idle timeout of the single connection holding an in-memory store
pub const IN_MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Name of the users table
pub const USERS_TABLE: &str = "users";

// =============================================================================
// Environment
// =============================================================================

/// `APP_ENV` value that selects the ephemeral test mode
pub const APP_ENV_TEST: &str = "test";

/// `APP_ENV` value for production deployments
pub const APP_ENV_PRODUCTION: &str = "production";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
