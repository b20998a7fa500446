//! User service - Maps the five user operations onto the repository.
//!
//! The service is transport independent: it takes the raw path id and the
//! decoded JSON body and returns the JSON value the caller should send back.
//! A missing user is never an error here.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{parse_user_id, User, UserFields};
use crate::errors::AppResult;
use crate::infra::UserRepository;

/// Result of looking up a single user.
///
/// Serializes to the user object when found and to `{}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserLookup {
    Found(User),
    Missing {},
}

impl From<Option<User>> for UserLookup {
    fn from(user: Option<User>) -> Self {
        match user {
            Some(user) => Self::Found(user),
            None => Self::Missing {},
        }
    }
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Store a new user and echo the submitted body
    async fn create(&self, body: Value) -> AppResult<Value>;

    /// Every stored user
    async fn list(&self) -> AppResult<Vec<User>>;

    /// The user with this id, or `{}` when there is none
    async fn read_one(&self, raw_id: &str) -> AppResult<UserLookup>;

    /// Overwrite name and age of a user and echo the submitted body
    async fn update(&self, raw_id: &str, body: Value) -> AppResult<Value>;

    /// Remove a user and echo the submitted body
    async fn delete(&self, raw_id: &str, body: Value) -> AppResult<Value>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create(&self, body: Value) -> AppResult<Value> {
        let id = self.repo.insert(UserFields::from_body(&body)).await?;
        tracing::info!(id, "User created");
        Ok(body)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.repo.list_all().await
    }

    async fn read_one(&self, raw_id: &str) -> AppResult<UserLookup> {
        let Some(id) = parse_user_id(raw_id) else {
            tracing::debug!(raw_id, "Non-numeric user id, nothing to read");
            return Ok(UserLookup::Missing {});
        };

        Ok(self.repo.find_by_id(id).await?.into())
    }

    async fn update(&self, raw_id: &str, body: Value) -> AppResult<Value> {
        if let Some(id) = parse_user_id(raw_id) {
            self.repo.update_by_id(id, UserFields::from_body(&body)).await?;
        }
        Ok(body)
    }

    async fn delete(&self, raw_id: &str, body: Value) -> AppResult<Value> {
        if let Some(id) = parse_user_id(raw_id) {
            self.repo.delete_by_id(id).await?;
        }
        Ok(body)
    }
}
