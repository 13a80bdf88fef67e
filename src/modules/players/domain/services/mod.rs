pub mod age_classifier;
pub mod filter_builder;
pub mod ranking;
pub mod title_classifier;

pub use age_classifier::AgeClassifier;
pub use filter_builder::{FilterBuilder, SearchParameters};
pub use ranking::{RankedPlayer, RankingAssigner};
pub use title_classifier::{TitleClassifier, TitleProfile};
