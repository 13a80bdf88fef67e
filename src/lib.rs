pub mod modules;
pub mod schema;
pub mod shared;

pub use modules::players::{InMemoryRecordStore, PlayerService, SqlitePlayerStore};
pub use modules::statistics::StatisticsService;
pub use shared::errors::{AppError, AppResult};
