//! Database connection and initialization.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{DatabaseOptions, IN_MEMORY_CONNECTION_LIFETIME};
use crate::errors::AppResult;
use crate::infra::repositories::UserStore;

pub mod migrations;

pub use migrations::Migrator;

/// Database wrapper for connection management.
///
/// Opened once at startup and shared by every request; call [`Database::close`]
/// on shutdown to release the pool.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool, ensure the schema exists and, in test mode, clear it.
    pub async fn connect(options: &DatabaseOptions) -> AppResult<Self> {
        let db = Self::connect_without_migrations(options).await?;

        Migrator::up(&db.connection, None).await?;
        tracing::info!("Database connected and migrations applied");

        if options.reset_on_start {
            UserStore::new(db.get_connection()).reset().await?;
        }

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(options: &DatabaseOptions) -> Result<Self, DbErr> {
        let mut connect_options = ConnectOptions::new(options.url.clone());
        connect_options
            .max_connections(options.max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        // Recycling the only connection would drop the in-memory database with it
        if options.is_in_memory() {
            connect_options
                .idle_timeout(IN_MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(IN_MEMORY_CONNECTION_LIFETIME);
        }

        let connection = SeaDatabase::connect(connect_options).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the pool. Every clone of this handle stops working afterwards.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.connection.clone().close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
