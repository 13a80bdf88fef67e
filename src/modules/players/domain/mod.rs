pub mod entities;
pub mod repositories;
pub mod services;
pub mod specifications;
pub mod value_objects;

// Re-exports for easy access
pub use entities::PlayerRecord;
pub use repositories::RecordStore;
