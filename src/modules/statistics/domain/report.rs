use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::value_objects::{AgeGroup, Gender, RatingDiscipline, RatingPresence};

/// Round to two decimals for reporting
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `part` in `whole` as a percentage; 0 for an empty whole
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 * 100.0 / whole as f64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderShare {
    pub gender: Gender,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderBreakdown {
    pub total: u64,
    pub shares: Vec<GenderShare>,
}

impl GenderBreakdown {
    pub fn count(&self, gender: Gender) -> u64 {
        self.shares
            .iter()
            .find(|share| share.gender == gender)
            .map_or(0, |share| share.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FederationShare {
    pub federation: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationBreakdown {
    pub total_federations: u64,
    /// Largest federations by count, ties by code
    pub top: Vec<FederationShare>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DisciplineAverage {
    /// Mean over records rated in the discipline, two decimals
    pub average: Option<f64>,
    pub rated: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingAverages {
    pub standard: DisciplineAverage,
    pub rapid: DisciplineAverage,
    pub blitz: DisciplineAverage,
}

impl RatingAverages {
    pub fn get(&self, discipline: RatingDiscipline) -> DisciplineAverage {
        match discipline {
            RatingDiscipline::Standard => self.standard,
            RatingDiscipline::Rapid => self.rapid,
            RatingDiscipline::Blitz => self.blitz,
        }
    }

    pub fn set(&mut self, discipline: RatingDiscipline, value: DisciplineAverage) {
        match discipline {
            RatingDiscipline::Standard => self.standard = value,
            RatingDiscipline::Rapid => self.rapid = value,
            RatingDiscipline::Blitz => self.blitz = value,
        }
    }
}

/// Mutually exclusive rating-presence classes; they always sum to the population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceDistribution {
    pub all_three: u64,
    pub standard_rapid_only: u64,
    pub standard_blitz_only: u64,
    pub rapid_blitz_only: u64,
    pub standard_only: u64,
    pub rapid_only: u64,
    pub blitz_only: u64,
    pub unrated: u64,
    pub at_least_one: u64,
}

impl PresenceDistribution {
    pub fn get(&self, class: RatingPresence) -> u64 {
        match class {
            RatingPresence::AllThree => self.all_three,
            RatingPresence::StandardRapidOnly => self.standard_rapid_only,
            RatingPresence::StandardBlitzOnly => self.standard_blitz_only,
            RatingPresence::RapidBlitzOnly => self.rapid_blitz_only,
            RatingPresence::StandardOnly => self.standard_only,
            RatingPresence::RapidOnly => self.rapid_only,
            RatingPresence::BlitzOnly => self.blitz_only,
            RatingPresence::Unrated => self.unrated,
        }
    }

    /// Build from per-class counts; `at_least_one` is derived
    pub fn from_counts(counts: impl Fn(RatingPresence) -> u64) -> Self {
        let mut distribution = Self {
            all_three: counts(RatingPresence::AllThree),
            standard_rapid_only: counts(RatingPresence::StandardRapidOnly),
            standard_blitz_only: counts(RatingPresence::StandardBlitzOnly),
            rapid_blitz_only: counts(RatingPresence::RapidBlitzOnly),
            standard_only: counts(RatingPresence::StandardOnly),
            rapid_only: counts(RatingPresence::RapidOnly),
            blitz_only: counts(RatingPresence::BlitzOnly),
            unrated: counts(RatingPresence::Unrated),
            at_least_one: 0,
        };
        distribution.at_least_one = distribution.sum() - distribution.unrated;
        distribution
    }

    /// Sum over all classes
    pub fn sum(&self) -> u64 {
        RatingPresence::ALL.iter().map(|class| self.get(*class)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCount {
    pub title: String,
    pub total: u64,
    pub male: u64,
    pub female: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleStatistics {
    pub total_titled: u64,
    pub titled_male: u64,
    pub titled_female: u64,
    /// Most held titles first
    pub per_title: Vec<TitleCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatedSplit {
    pub rated: u64,
    pub unrated: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucketStatistics {
    pub label: String,
    pub min_age: i32,
    pub max_age: Option<i32>,
    pub total: u64,
    pub rated: u64,
    pub unrated: u64,
    pub presence: PresenceDistribution,
    pub averages: RatingAverages,
    pub male: RatedSplit,
    pub female: RatedSplit,
}

/// Whole-population report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub include_inactive: bool,
    pub reference_year: i32,
    pub overview: Overview,
    pub gender: GenderBreakdown,
    pub federations: FederationBreakdown,
    pub ratings: RatingAverages,
    pub rating_presence: PresenceDistribution,
    pub titles: TitleStatistics,
    pub age_buckets: Vec<AgeBucketStatistics>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderTopPlayers {
    pub gender: Gender,
    /// Mean rating of the listed players, two decimals
    pub average_rating: Option<f64>,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupStatistics {
    pub age_group: AgeGroup,
    pub min_birth_year: Option<i32>,
    pub max_birth_year: i32,
    pub overview: Overview,
    pub top_players: Vec<GenderTopPlayers>,
    pub youngest: Option<PlayerRecord>,
    pub oldest: Option<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupReport {
    pub rating_type: RatingDiscipline,
    pub reference_year: i32,
    pub groups: Vec<AgeGroupStatistics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_and_percentage() {
        assert_eq!(round2(2345.678), 2345.68);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_presence_at_least_one_is_derived() {
        let distribution = PresenceDistribution::from_counts(|class| match class {
            RatingPresence::Unrated => 4,
            RatingPresence::StandardOnly => 3,
            _ => 1,
        });
        assert_eq!(distribution.sum(), 13);
        assert_eq!(distribution.at_least_one, 9);
        assert_eq!(distribution.get(RatingPresence::StandardOnly), 3);
    }
}
