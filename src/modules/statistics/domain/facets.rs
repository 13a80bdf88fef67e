/// Independent statistics facets
///
/// Each facet declares the store facets it needs and turns their raw rows into
/// one typed section of the report. Facets never read each other's output.
use std::collections::BTreeMap;

use crate::modules::players::domain::services::title_classifier::TITLE_SETS;
use crate::modules::players::domain::services::{AgeClassifier, FilterBuilder, TitleClassifier};
use crate::modules::players::domain::specifications::{
    Accumulator, FacetKey, FacetResult, FacetRow, FacetSpec, FilterSpec, GroupKey, NumericField,
    Predicate, TextField,
};
use crate::modules::players::domain::value_objects::rating_presence::rated_predicate;
use crate::modules::players::domain::value_objects::{
    AgeBucket, Gender, RatingDiscipline, RatingPresence,
};

use super::report::{
    percentage, round2, AgeBucketStatistics, DisciplineAverage, FederationBreakdown,
    FederationShare, GenderBreakdown, GenderShare, Overview, PresenceDistribution, RatedSplit,
    RatingAverages, TitleCount, TitleStatistics,
};

pub const TOP_FEDERATIONS: usize = 20;

pub trait StatisticsFacet: Send + Sync {
    type Output: Send;

    fn specs(&self) -> Vec<FacetSpec>;

    /// `results` holds one result per spec, in `specs()` order
    fn read(&self, results: &[FacetResult]) -> Self::Output;
}

/// Records the report covers
pub fn population(include_inactive: bool) -> FilterSpec {
    FilterBuilder::with_activity(FilterSpec::new(), include_inactive)
}

fn gender_is(gender: Gender) -> Predicate {
    Predicate::Equals(TextField::Gender, gender.code().to_string())
}

fn rated(discipline: RatingDiscipline) -> FilterSpec {
    FilterSpec::new().and(rated_predicate(discipline.rating_field(), true))
}

fn first_row(results: &[FacetResult], index: usize) -> Option<&FacetRow> {
    results.get(index).and_then(FacetResult::single)
}

fn count_in(row: Option<&FacetRow>, index: usize) -> u64 {
    row.map_or(0, |r| r.count_at(index))
}

// Shared accumulator layouts

fn average_accumulators() -> Vec<Accumulator> {
    RatingDiscipline::ALL
        .iter()
        .flat_map(|discipline| {
            [
                Accumulator::Average {
                    field: discipline.rating_field(),
                    filter: rated(*discipline),
                },
                Accumulator::CountWhere(rated(*discipline)),
            ]
        })
        .collect()
}

fn read_averages(row: Option<&FacetRow>, offset: usize) -> RatingAverages {
    let mut averages = RatingAverages::default();
    for (i, discipline) in RatingDiscipline::ALL.iter().enumerate() {
        let index = offset + 2 * i;
        averages.set(
            *discipline,
            DisciplineAverage {
                average: row.and_then(|r| r.average_at(index)).map(round2),
                rated: count_in(row, index + 1),
            },
        );
    }
    averages
}

fn presence_accumulators() -> Vec<Accumulator> {
    RatingPresence::ALL
        .iter()
        .map(|class| Accumulator::CountWhere(class.filter()))
        .collect()
}

fn read_presence(row: Option<&FacetRow>, offset: usize) -> PresenceDistribution {
    PresenceDistribution::from_counts(|class| {
        let position = RatingPresence::ALL
            .iter()
            .position(|candidate| *candidate == class)
            .unwrap_or_default();
        count_in(row, offset + position)
    })
}

/// Total, active and inactive counts
pub struct OverviewFacet {
    pub population: FilterSpec,
}

impl StatisticsFacet for OverviewFacet {
    type Output = Overview;

    fn specs(&self) -> Vec<FacetSpec> {
        vec![FacetSpec::new("overview", self.population.clone())
            .accumulate(Accumulator::Count)
            .accumulate(Accumulator::CountWhere(
                FilterSpec::new().and(FilterBuilder::active_predicate()),
            ))]
    }

    fn read(&self, results: &[FacetResult]) -> Overview {
        let row = first_row(results, 0);
        let total = count_in(row, 0);
        let active = count_in(row, 1);
        Overview {
            total,
            active,
            inactive: total - active,
        }
    }
}

pub struct GenderFacet {
    pub population: FilterSpec,
}

impl StatisticsFacet for GenderFacet {
    type Output = GenderBreakdown;

    fn specs(&self) -> Vec<FacetSpec> {
        vec![FacetSpec::new("gender", self.population.clone())
            .group_by(GroupKey::Field(TextField::Gender))
            .accumulate(Accumulator::Count)]
    }

    fn read(&self, results: &[FacetResult]) -> GenderBreakdown {
        let counts: BTreeMap<String, u64> = results
            .first()
            .map(|result| {
                result
                    .rows
                    .iter()
                    .filter_map(|row| match &row.key {
                        FacetKey::Text(code) => Some((code.clone(), row.count_at(0))),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total: u64 = counts.values().sum();
        let shares = Gender::ALL
            .iter()
            .map(|gender| {
                let count = counts.get(gender.code()).copied().unwrap_or(0);
                GenderShare {
                    gender: *gender,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();

        GenderBreakdown { total, shares }
    }
}

/// Largest federations by record count
pub struct FederationFacet {
    pub population: FilterSpec,
    pub limit: usize,
}

impl StatisticsFacet for FederationFacet {
    type Output = FederationBreakdown;

    fn specs(&self) -> Vec<FacetSpec> {
        vec![FacetSpec::new("federations", self.population.clone())
            .group_by(GroupKey::Field(TextField::Federation))
            .accumulate(Accumulator::Count)]
    }

    fn read(&self, results: &[FacetResult]) -> FederationBreakdown {
        let mut counts: Vec<(String, u64)> = results
            .first()
            .map(|result| {
                result
                    .rows
                    .iter()
                    .filter_map(|row| match &row.key {
                        FacetKey::Text(code) => Some((code.clone(), row.count_at(0))),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total: u64 = counts.iter().map(|(_, count)| count).sum();
        let total_federations = counts.len() as u64;
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let top = counts
            .into_iter()
            .take(self.limit)
            .map(|(federation, count)| FederationShare {
                federation,
                count,
                percentage: percentage(count, total),
            })
            .collect();

        FederationBreakdown {
            total_federations,
            top,
        }
    }
}

/// Mean rating per discipline over rated records
pub struct RatingAverageFacet {
    pub population: FilterSpec,
}

impl StatisticsFacet for RatingAverageFacet {
    type Output = RatingAverages;

    fn specs(&self) -> Vec<FacetSpec> {
        let spec = average_accumulators()
            .into_iter()
            .fold(FacetSpec::new("ratings", self.population.clone()), FacetSpec::accumulate);
        vec![spec]
    }

    fn read(&self, results: &[FacetResult]) -> RatingAverages {
        read_averages(first_row(results, 0), 0)
    }
}

/// Which combination of disciplines each record is rated in
pub struct RatingPresenceFacet {
    pub population: FilterSpec,
}

impl StatisticsFacet for RatingPresenceFacet {
    type Output = PresenceDistribution;

    fn specs(&self) -> Vec<FacetSpec> {
        let spec = presence_accumulators()
            .into_iter()
            .fold(FacetSpec::new("presence", self.population.clone()), FacetSpec::accumulate);
        vec![spec]
    }

    fn read(&self, results: &[FacetResult]) -> PresenceDistribution {
        read_presence(first_row(results, 0), 0)
    }
}

/// Holders of competitive titles in any title set, and per-title counts with gender split
pub struct TitleFacet {
    pub population: FilterSpec,
}

impl TitleFacet {
    fn gender_split(spec: FacetSpec) -> FacetSpec {
        spec.accumulate(Accumulator::Count)
            .accumulate(Accumulator::CountWhere(
                FilterSpec::new().and(gender_is(Gender::Male)),
            ))
            .accumulate(Accumulator::CountWhere(
                FilterSpec::new().and(gender_is(Gender::Female)),
            ))
    }
}

impl StatisticsFacet for TitleFacet {
    type Output = TitleStatistics;

    fn specs(&self) -> Vec<FacetSpec> {
        let titled = self
            .population
            .clone()
            .and(TitleClassifier::competitive_predicate());

        vec![
            Self::gender_split(FacetSpec::new("titled", titled.clone())),
            Self::gender_split(
                FacetSpec::new("per_title", titled).group_by(GroupKey::Unwind(TITLE_SETS.to_vec())),
            ),
        ]
    }

    fn read(&self, results: &[FacetResult]) -> TitleStatistics {
        let titled = first_row(results, 0);

        let mut per_title: Vec<TitleCount> = results
            .get(1)
            .map(|result| {
                result
                    .rows
                    .iter()
                    .filter_map(|row| match &row.key {
                        // unwinding other titles also yields trainer and arbiter codes
                        FacetKey::Text(title) if TitleClassifier::is_competitive_code(title) => {
                            Some(TitleCount {
                                title: title.clone(),
                                total: row.count_at(0),
                                male: row.count_at(1),
                                female: row.count_at(2),
                            })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        per_title.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.title.cmp(&b.title)));

        TitleStatistics {
            total_titled: count_in(titled, 0),
            titled_male: count_in(titled, 1),
            titled_female: count_in(titled, 2),
            per_title,
        }
    }
}

// Age bucket accumulator layout
const BUCKET_TOTAL: usize = 0;
const BUCKET_RATED: usize = 1;
const BUCKET_PRESENCE: usize = 2;
const BUCKET_AVERAGES: usize = BUCKET_PRESENCE + RatingPresence::ALL.len();
const BUCKET_GENDER: usize = BUCKET_AVERAGES + 2 * RatingDiscipline::ALL.len();

/// Distribution over single-year-boundary age buckets; records without a
/// usable birth year are left out
pub struct AgeBucketFacet {
    pub population: FilterSpec,
    pub current_year: i32,
}

impl StatisticsFacet for AgeBucketFacet {
    type Output = Vec<AgeBucketStatistics>;

    fn specs(&self) -> Vec<FacetSpec> {
        let with_age = self.population.clone().and(Predicate::Range {
            field: NumericField::BirthYear,
            min: None,
            max: Some(i64::from(self.current_year)),
        });

        let mut spec = FacetSpec::new("age_buckets", with_age)
            .group_by(GroupKey::Bucket {
                field: NumericField::BirthYear,
                boundaries: AgeClassifier::bucket_birth_year_boundaries(self.current_year),
                overflow: Some(AgeClassifier::top_bucket().label()),
            })
            .accumulate(Accumulator::Count)
            .accumulate(Accumulator::CountWhere(RatingPresence::any_rating_filter()));

        for accumulator in presence_accumulators().into_iter().chain(average_accumulators()) {
            spec = spec.accumulate(accumulator);
        }

        for gender in Gender::ALL {
            spec = spec
                .accumulate(Accumulator::CountWhere(
                    RatingPresence::any_rating_filter().and(gender_is(gender)),
                ))
                .accumulate(Accumulator::CountWhere(
                    RatingPresence::unrated_filter().and(gender_is(gender)),
                ));
        }

        vec![spec]
    }

    fn read(&self, results: &[FacetResult]) -> Vec<AgeBucketStatistics> {
        let mut rows: BTreeMap<AgeBucket, &FacetRow> = BTreeMap::new();
        if let Some(result) = results.first() {
            for row in &result.rows {
                let bucket = match &row.key {
                    FacetKey::Bucket(lower) => {
                        AgeClassifier::bucket_for_lower_birth_year(*lower, self.current_year)
                    }
                    FacetKey::Overflow(_) => Some(AgeClassifier::top_bucket()),
                    _ => None,
                };
                if let Some(bucket) = bucket {
                    rows.insert(bucket, row);
                }
            }
        }

        AgeBucket::all()
            .into_iter()
            .map(|bucket| {
                let row = rows.get(&bucket).copied();
                let total = count_in(row, BUCKET_TOTAL);
                let rated = count_in(row, BUCKET_RATED);
                let split = |offset: usize| RatedSplit {
                    rated: count_in(row, offset),
                    unrated: count_in(row, offset + 1),
                };

                AgeBucketStatistics {
                    label: bucket.label(),
                    min_age: bucket.min_age,
                    max_age: bucket.max_age,
                    total,
                    rated,
                    unrated: total - rated,
                    presence: read_presence(row, BUCKET_PRESENCE),
                    averages: read_averages(row, BUCKET_AVERAGES),
                    male: split(BUCKET_GENDER),
                    female: split(BUCKET_GENDER + 2),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::players::domain::entities::PlayerRecord;

    fn run<F: StatisticsFacet>(facet: &F, records: &[PlayerRecord]) -> F::Output {
        let results: Vec<FacetResult> = facet
            .specs()
            .iter()
            .map(|spec| spec.evaluate(records.iter().filter(|r| spec.filter.matches(r))))
            .collect();
        facet.read(&results)
    }

    fn population_sample() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("1", "A", "NEP", Gender::Male)
                .with_ratings(2450, 0, 0)
                .with_titles(&["IM"])
                .with_birth_year(1990),
            PlayerRecord::new("2", "B", "NEP", Gender::Female)
                .with_ratings(1800, 1750, 1700)
                .with_women_titles(&["WFM"])
                .with_birth_year(2012),
            PlayerRecord::new("3", "C", "IND", Gender::Male)
                .with_ratings(0, 0, 0)
                .with_activity_flag("i")
                .with_birth_year(1935),
            PlayerRecord::new("4", "D", "IND", Gender::Female).with_ratings(0, 1600, 0),
            PlayerRecord::new("5", "E", "USA", Gender::Male)
                .with_ratings(2600, 0, 2550)
                .with_titles(&["GM"])
                .with_birth_year(2005),
        ]
    }

    #[test]
    fn test_overview_counts_activity() {
        let overview = run(
            &OverviewFacet {
                population: population(true),
            },
            &population_sample(),
        );
        assert_eq!(overview, Overview { total: 5, active: 4, inactive: 1 });

        let active_only = run(
            &OverviewFacet {
                population: population(false),
            },
            &population_sample(),
        );
        assert_eq!(active_only.total, 4);
        assert_eq!(active_only.inactive, 0);
    }

    #[test]
    fn test_gender_percentages() {
        let breakdown = run(
            &GenderFacet {
                population: population(true),
            },
            &population_sample(),
        );
        assert_eq!(breakdown.total, 5);
        assert_eq!(breakdown.count(Gender::Male), 3);
        assert_eq!(breakdown.shares[1].percentage, 40.0);
    }

    #[test]
    fn test_federations_sorted_and_limited() {
        let breakdown = run(
            &FederationFacet {
                population: population(true),
                limit: 2,
            },
            &population_sample(),
        );
        assert_eq!(breakdown.total_federations, 3);
        let codes: Vec<&str> = breakdown.top.iter().map(|f| f.federation.as_str()).collect();
        assert_eq!(codes, vec!["IND", "NEP"]);
        assert_eq!(breakdown.top[0].percentage, 40.0);
    }

    #[test]
    fn test_averages_ignore_unrated() {
        let averages = run(
            &RatingAverageFacet {
                population: population(true),
            },
            &population_sample(),
        );
        assert_eq!(averages.standard.rated, 3);
        assert_eq!(averages.standard.average, Some(2283.33));
        assert_eq!(averages.rapid.average, Some(1675.0));
        assert_eq!(averages.blitz.average, Some(2125.0));
    }

    #[test]
    fn test_presence_partitions_population() {
        let sample = population_sample();
        let presence = run(
            &RatingPresenceFacet {
                population: population(true),
            },
            &sample,
        );
        assert_eq!(presence.sum(), sample.len() as u64);
        assert_eq!(presence.at_least_one, sample.len() as u64 - presence.unrated);
        assert_eq!(presence.standard_only, 1);
        assert_eq!(presence.all_three, 1);
        assert_eq!(presence.rapid_only, 1);
        assert_eq!(presence.standard_blitz_only, 1);
        assert_eq!(presence.unrated, 1);
    }

    #[test]
    fn test_title_statistics() {
        let titles = run(
            &TitleFacet {
                population: population(true),
            },
            &population_sample(),
        );
        assert_eq!(titles.total_titled, 3);
        assert_eq!(titles.titled_female, 1);
        assert_eq!(titles.per_title.len(), 3);
        let wfm = titles.per_title.iter().find(|t| t.title == "WFM").unwrap();
        assert_eq!((wfm.total, wfm.male, wfm.female), (1, 0, 1));
    }

    #[test]
    fn test_titles_counted_across_all_title_sets() {
        let records = vec![
            PlayerRecord::new("1", "A", "NEP", Gender::Male).with_other_titles(&["GM"]),
            PlayerRecord::new("2", "B", "NEP", Gender::Male)
                .with_titles(&["GM"])
                .with_other_titles(&["GM", "FT"]),
            PlayerRecord::new("3", "C", "NEP", Gender::Female).with_other_titles(&["IA"]),
        ];
        let titles = run(
            &TitleFacet {
                population: population(true),
            },
            &records,
        );

        assert_eq!(titles.total_titled, 2);
        assert_eq!(titles.titled_female, 0);
        let codes: Vec<(&str, u64)> = titles
            .per_title
            .iter()
            .map(|t| (t.title.as_str(), t.total))
            .collect();
        assert_eq!(codes, vec![("GM", 2)]);
    }

    #[test]
    fn test_age_buckets() {
        let buckets = run(
            &AgeBucketFacet {
                population: population(true),
                current_year: 2025,
            },
            &population_sample(),
        );
        assert_eq!(buckets.len(), 15);

        let by_label = |label: &str| buckets.iter().find(|b| b.label == label).unwrap().clone();
        assert_eq!(by_label("12-13").total, 1);
        assert_eq!(by_label("20").total, 1);
        assert_eq!(by_label("30-39").total, 1);
        let oldest = by_label("80+");
        assert_eq!(oldest.total, 1);
        assert_eq!(oldest.unrated, 1);
        assert_eq!(oldest.male, RatedSplit { rated: 0, unrated: 1 });

        let counted: u64 = buckets.iter().map(|b| b.total).sum();
        assert_eq!(counted, 4);
        for bucket in &buckets {
            assert_eq!(bucket.presence.sum(), bucket.total);
        }
    }
}
