//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the repository trait so the
//! store can be swapped or mocked.

mod user_service;

pub use user_service::{UserLookup, UserManager, UserService};
