pub mod activity_status;
pub mod age_group;
pub mod gender;
pub mod rating_discipline;
pub mod rating_presence;
pub mod title_category;

pub use activity_status::ActivityStatus;
pub use age_group::{AgeBucket, AgeGroup, AgeGroupDescriptor};
pub use gender::Gender;
pub use rating_discipline::RatingDiscipline;
pub use rating_presence::RatingPresence;
pub use title_category::TitleCategory;
