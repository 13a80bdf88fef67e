// Statistics context: population report and age-group summaries
pub mod application;
pub mod commands;
pub mod domain;

pub use application::StatisticsService;
pub use domain::{AgeGroupReport, StatisticsReport};
