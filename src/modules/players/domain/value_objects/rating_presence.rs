use serde::{Deserialize, Serialize};

use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::specifications::{FilterSpec, NumericField, Predicate};

/// Which disciplines carry a real (non-zero) rating.
///
/// The eight variants partition every population: each record falls in
/// exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatingPresence {
    AllThree,
    StandardRapidOnly,
    StandardBlitzOnly,
    RapidBlitzOnly,
    StandardOnly,
    RapidOnly,
    BlitzOnly,
    Unrated,
}

impl RatingPresence {
    pub const ALL: [RatingPresence; 8] = [
        RatingPresence::AllThree,
        RatingPresence::StandardRapidOnly,
        RatingPresence::StandardBlitzOnly,
        RatingPresence::RapidBlitzOnly,
        RatingPresence::StandardOnly,
        RatingPresence::RapidOnly,
        RatingPresence::BlitzOnly,
        RatingPresence::Unrated,
    ];

    pub fn from_flags(standard: bool, rapid: bool, blitz: bool) -> Self {
        match (standard, rapid, blitz) {
            (true, true, true) => RatingPresence::AllThree,
            (true, true, false) => RatingPresence::StandardRapidOnly,
            (true, false, true) => RatingPresence::StandardBlitzOnly,
            (false, true, true) => RatingPresence::RapidBlitzOnly,
            (true, false, false) => RatingPresence::StandardOnly,
            (false, true, false) => RatingPresence::RapidOnly,
            (false, false, true) => RatingPresence::BlitzOnly,
            (false, false, false) => RatingPresence::Unrated,
        }
    }

    pub fn classify(record: &PlayerRecord) -> Self {
        Self::from_flags(
            record.standard_rating > 0,
            record.rapid_rating > 0,
            record.blitz_rating > 0,
        )
    }

    /// (standard, rapid, blitz) rated flags
    pub fn flags(&self) -> (bool, bool, bool) {
        match self {
            RatingPresence::AllThree => (true, true, true),
            RatingPresence::StandardRapidOnly => (true, true, false),
            RatingPresence::StandardBlitzOnly => (true, false, true),
            RatingPresence::RapidBlitzOnly => (false, true, true),
            RatingPresence::StandardOnly => (true, false, false),
            RatingPresence::RapidOnly => (false, true, false),
            RatingPresence::BlitzOnly => (false, false, true),
            RatingPresence::Unrated => (false, false, false),
        }
    }

    /// Store filter selecting exactly the records of this class
    pub fn filter(&self) -> FilterSpec {
        let (standard, rapid, blitz) = self.flags();
        FilterSpec::new()
            .and(rated_predicate(NumericField::StandardRating, standard))
            .and(rated_predicate(NumericField::RapidRating, rapid))
            .and(rated_predicate(NumericField::BlitzRating, blitz))
    }

    /// Filter for records rated in at least one discipline
    pub fn any_rating_filter() -> FilterSpec {
        FilterSpec::new().and(Predicate::AnyOf(vec![
            rated_predicate(NumericField::StandardRating, true),
            rated_predicate(NumericField::RapidRating, true),
            rated_predicate(NumericField::BlitzRating, true),
        ]))
    }

    /// Filter for records without any rating
    pub fn unrated_filter() -> FilterSpec {
        RatingPresence::Unrated.filter()
    }
}

pub fn rated_predicate(field: NumericField, rated: bool) -> Predicate {
    if rated {
        Predicate::Range {
            field,
            min: Some(1),
            max: None,
        }
    } else {
        Predicate::Range {
            field,
            min: None,
            max: Some(0),
        }
    }
}
