// Shared Kernel
// Cross-cutting pieces used by the players and statistics contexts

pub mod application; // Pagination and response envelopes
pub mod config; // Environment-driven configuration
pub mod domain; // Shared domain concepts (clock)
pub mod errors; // Shared error types
pub mod infrastructure; // Database pool and migrations
pub mod utils; // Logging and parameter validation

// Re-exports for convenience
pub use config::AppConfig;
pub use infrastructure::database::Database;
