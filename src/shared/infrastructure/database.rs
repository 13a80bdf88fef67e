use crate::log_info;
use crate::shared::config::AppConfig;
use crate::shared::errors::AppError;
use crate::shared::utils::logger::LogContext;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_sql_function! {
    /// Unicode lowercase; SQLite's own `lower` and `LIKE` only fold ASCII
    fn unicode_lower(value: Text) -> Text;
}

/// Per-connection SQLite settings and functions
#[derive(Debug)]
struct SqliteSetup;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        diesel::sql_query("PRAGMA busy_timeout = 5000")
            .execute(conn)
            .map_err(r2d2::Error::QueryError)?;
        unicode_lower_utils::register_impl(conn, |value: String| value.to_lowercase())
            .map_err(r2d2::Error::QueryError)
    }
}

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());

        // An in-memory database is private to its connection, so the pool holds one
        let in_memory = config.database_url == ":memory:";
        let builder = r2d2::Pool::builder()
            .max_size(if in_memory { 1 } else { config.pool_size })
            .connection_timeout(Duration::from_secs(10)) // Time to wait for connection from pool
            .connection_customizer(Box::new(SqliteSetup));

        let builder = if in_memory {
            builder.min_idle(Some(1)).idle_timeout(None).max_lifetime(None)
        } else {
            builder
                .idle_timeout(Some(Duration::from_secs(300))) // Close idle connections after 5 minutes
                .max_lifetime(Some(Duration::from_secs(1800))) // Replace connections after 30 minutes
        };

        let pool = builder.build(manager).map_err(|e| {
            AppError::StoreFailure(format!("Failed to create connection pool: {}", e))
        })?;

        log_info!(
            "Database connection pool initialized for '{}' with max_size: {}",
            config.database_url,
            pool.max_size()
        );

        Ok(Self { pool })
    }

    pub fn get_connection(&self) -> Result<DbConnection, AppError> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::performance_metric("db_connection_acquire", duration, Some("slow"));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Apply embedded schema migrations
    pub fn run_migrations(&self) -> Result<usize, AppError> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::StoreFailure(format!("Failed to run migrations: {}", e)))?;

        log_info!("Applied {} pending migration(s)", applied.len());
        Ok(applied.len())
    }

    /// Get pool statistics for monitoring
    pub fn pool_status(&self) -> PoolStatus {
        let state = self.pool.state();
        PoolStatus {
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_size: self.pool.max_size(),
        }
    }
}

#[derive(Debug)]
pub struct PoolStatus {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_size: u32,
}
