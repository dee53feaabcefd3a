//! r2d2 connection pool for Diesel SQLite connections.
//!
//! Wraps `diesel::r2d2` to provide pooled connections for the persistence
//! layer, runs the embedded migrations on startup, and switches each
//! connection into a web-app-friendly mode (foreign keys enforced, busy
//! timeout instead of immediate lock errors).
//!
//! Diesel has no async SQLite backend, so the repositories move their queries
//! off the async runtime with `spawn_blocking` rather than through an async
//! connection manager.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool or run migrations.
    #[error("failed to initialise database: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Connection pool for SQLite via Diesel.
#[derive(Clone, Debug)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Build a pool for `database_url` and run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the database cannot be opened or a
    /// migration fails.
    pub fn connect(database_url: &str) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;

        let mut conn = pool.get().map_err(|err| PoolError::build(err.to_string()))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| PoolError::build(err.to_string()))?;
        if !applied.is_empty() {
            tracing::info!(count = applied.len(), "applied database migrations");
        }

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] if a connection cannot be obtained
    /// within the pool's timeout.
    pub fn get(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, PoolError> {
        self.inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;

    #[test]
    fn connect_runs_migrations() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("pool.db");
        let pool = DbPool::connect(db_path.to_str().expect("utf-8 path")).expect("pool builds");

        let mut conn = pool.get().expect("connection checks out");
        let count: i64 = crate::outbound::persistence::schema::users::table
            .count()
            .get_result(&mut conn)
            .expect("users table exists");
        assert_eq!(count, 0);
    }

    #[test]
    fn connect_rejects_unwritable_path() {
        let err = DbPool::connect("/nonexistent-dir/quillboard.db")
            .expect_err("bad path must fail");
        assert!(matches!(err, PoolError::Build { .. }));
    }
}
