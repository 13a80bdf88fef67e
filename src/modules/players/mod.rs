pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::PlayerService;
pub use domain::{PlayerRecord, RecordStore};
pub use infrastructure::{InMemoryRecordStore, SqlitePlayerStore};
