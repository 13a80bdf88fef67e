/// Test helper functions and service builders
use super::db::fresh_database;
use chess_catalog::modules::players::domain::{entities::PlayerRecord, RecordStore};
use chess_catalog::shared::domain::FixedClock;
use chess_catalog::{InMemoryRecordStore, PlayerService, SqlitePlayerStore, StatisticsService};
use std::sync::Arc;

pub const REFERENCE_YEAR: i32 = 2025;

pub struct TestServices {
    pub players: PlayerService,
    pub statistics: StatisticsService,
}

fn build(store: Arc<dyn RecordStore>) -> TestServices {
    let clock = Arc::new(FixedClock::at_year(REFERENCE_YEAR));
    TestServices {
        players: PlayerService::new(Arc::clone(&store), clock.clone()),
        statistics: StatisticsService::new(store, clock),
    }
}

/// Services over an in-memory store holding `records`
pub fn memory_services(records: Vec<PlayerRecord>) -> TestServices {
    build(Arc::new(InMemoryRecordStore::new(records)))
}

/// A migrated `:memory:` SQLite store loaded with `records`
pub async fn sqlite_store(records: Vec<PlayerRecord>) -> Arc<SqlitePlayerStore> {
    let store = Arc::new(SqlitePlayerStore::new(fresh_database()));
    store
        .insert_batch(records)
        .await
        .expect("Failed to insert fixture records");
    store
}

/// Services over a SQLite store loaded with `records`
pub async fn sqlite_services(records: Vec<PlayerRecord>) -> TestServices {
    build(sqlite_store(records).await)
}
