pub mod memory_store;
pub mod persistence;

pub use memory_store::InMemoryRecordStore;
pub use persistence::SqlitePlayerStore;
