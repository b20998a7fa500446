//! User CRUD - create, list, read, update and delete users over HTTP.
//!
//! A single `users` table (`id`, `name`, `age`) behind five JSON endpoints.
//! Missing users are never errors: reads answer `{}` and writes do nothing.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: The `User` entity and request-field mapping
//! - **services**: The request-to-store mapping of each operation
//! - **infra**: Database lifecycle, migrations and the user store
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start with a freshly wiped in-memory store
//! APP_ENV=test cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
pub use infra::Database;
