pub mod models;
pub mod sql_predicates;
pub mod sqlite_store;

pub use models::PlayerRow;
pub use sqlite_store::SqlitePlayerStore;
