/// Database test utilities
///
/// Every call opens a fresh `:memory:` SQLite database, so tests never share state
use chess_catalog::shared::{AppConfig, Database};
use std::sync::Arc;

/// Open an empty database with the schema applied
pub fn fresh_database() -> Arc<Database> {
    let database = Database::new(&AppConfig::in_memory()).expect("Failed to open in-memory database");
    database.run_migrations().expect("Failed to run migrations");
    Arc::new(database)
}
