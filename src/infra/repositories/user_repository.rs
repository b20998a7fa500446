//! User repository: the persisted users table and its five statements.
//!
//! Every method issues exactly one statement. Update and delete on an id
//! that matches nothing affect zero rows and still succeed.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::USERS_TABLE;
use crate::domain::{User, UserFields};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Append a row and return its store-assigned id
    async fn insert(&self, fields: UserFields) -> AppResult<i64>;

    /// All rows in insertion order; empty when the table is empty
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// The row with this id, if any
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Overwrite name and age of the matching row (no-op when absent)
    async fn update_by_id(&self, id: i64, fields: UserFields) -> AppResult<()>;

    /// Remove the matching row (no-op when absent)
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Delete every row and restart id allocation at 1.
    ///
    /// Only used for ephemeral (test mode) stores.
    pub async fn reset(&self) -> AppResult<()> {
        match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => {
                UserEntity::delete_many().exec(&self.db).await?;
                self.db
                    .execute_unprepared(&format!(
                        "DELETE FROM sqlite_sequence WHERE name = '{}'",
                        USERS_TABLE
                    ))
                    .await?;
            }
            DatabaseBackend::Postgres => {
                self.db
                    .execute_unprepared(&format!("TRUNCATE TABLE {} RESTART IDENTITY", USERS_TABLE))
                    .await?;
            }
            _ => {
                self.db
                    .execute_unprepared(&format!("TRUNCATE TABLE {}", USERS_TABLE))
                    .await?;
            }
        }

        tracing::warn!(table = USERS_TABLE, "Users table reset");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, fields: UserFields) -> AppResult<i64> {
        let active_model = ActiveModel {
            name: Set(fields.name),
            age: Set(fields.age),
            ..Default::default()
        };

        let result = UserEntity::insert(active_model).exec(&self.db).await?;
        tracing::debug!(id = result.last_insert_id, "User inserted");
        Ok(result.last_insert_id)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn update_by_id(&self, id: i64, fields: UserFields) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(fields.name))
            .col_expr(user::Column::Age, Expr::value(fields.age))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::debug!(id, rows_affected = result.rows_affected, "User update executed");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(id, rows_affected = result.rows_affected, "User delete executed");
        Ok(())
    }
}
