// Bounded contexts
pub mod players; // Lookups, searches, rankings, title categories
pub mod statistics; // Population report and age-group summaries
