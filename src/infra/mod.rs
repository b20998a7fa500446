//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection lifecycle and schema migrations
//! - The users repository backing the HTTP surface

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
