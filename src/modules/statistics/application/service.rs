use std::sync::Arc;

use futures::future::try_join_all;

use super::dto::{AgeGroupStatisticsRequest, StatisticsRequest};
use crate::modules::players::domain::{
    entities::PlayerRecord,
    repositories::RecordStore,
    services::{AgeClassifier, FilterBuilder},
    specifications::{FilterSpec, NumericField, SortSpec},
    value_objects::{AgeGroup, Gender, RatingDiscipline},
};
use crate::modules::statistics::domain::facets::{
    population, AgeBucketFacet, FederationFacet, GenderFacet, OverviewFacet, RatingAverageFacet,
    RatingPresenceFacet, StatisticsFacet, TitleFacet, TOP_FEDERATIONS,
};
use crate::modules::statistics::domain::report::{
    round2, AgeGroupReport, AgeGroupStatistics, GenderTopPlayers, StatisticsReport,
};
use crate::shared::domain::Clock;
use crate::shared::errors::AppResult;
use crate::shared::utils::{TimedOperation, Validator};
use crate::log_debug;

const TOP_PLAYERS: u64 = 10;

/// Population statistics and per-age-group summaries
pub struct StatisticsService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Consolidated report; every facet sees the same filtered population
    pub async fn statistics(&self, request: &StatisticsRequest) -> AppResult<StatisticsReport> {
        let include_inactive =
            Validator::parse_flag("includeInactive", request.include_inactive.as_deref(), false)?;
        let generated_at = self.clock.now();
        let reference_year = self.clock.current_year();
        let population = population(include_inactive);

        let timer = TimedOperation::new("statistics report");

        let (overview, gender, federations, ratings, rating_presence, titles, age_buckets) = tokio::try_join!(
            self.run(OverviewFacet {
                population: population.clone(),
            }),
            self.run(GenderFacet {
                population: population.clone(),
            }),
            self.run(FederationFacet {
                population: population.clone(),
                limit: TOP_FEDERATIONS,
            }),
            self.run(RatingAverageFacet {
                population: population.clone(),
            }),
            self.run(RatingPresenceFacet {
                population: population.clone(),
            }),
            self.run(TitleFacet {
                population: population.clone(),
            }),
            self.run(AgeBucketFacet {
                population,
                current_year: reference_year,
            }),
        )?;

        timer.finish_with_info(&format!("{} records", overview.total));

        Ok(StatisticsReport {
            include_inactive,
            reference_year,
            overview,
            gender,
            federations,
            ratings,
            rating_presence,
            titles,
            age_buckets,
            generated_at,
        })
    }

    /// Counts, top rosters and age extremes for one or all age groups
    pub async fn age_group_statistics(
        &self,
        request: &AgeGroupStatisticsRequest,
    ) -> AppResult<AgeGroupReport> {
        let groups = match Validator::present(request.age_group.as_deref()) {
            Some(code) => vec![AgeClassifier::resolve_group("ageGroup", code)?],
            None => AgeGroup::ALL.to_vec(),
        };
        let genders = match Validator::present(request.gender.as_deref()) {
            Some(raw) => vec![Gender::parse_parameter("gender", raw)?],
            None => Gender::ALL.to_vec(),
        };
        let discipline =
            RatingDiscipline::parse_parameter("ratingType", request.rating_type.as_deref())?;
        let include_inactive =
            Validator::parse_flag("includeInactive", request.include_inactive.as_deref(), false)?;
        let reference_year = self.clock.current_year();

        let timer = TimedOperation::new("age group statistics");
        let groups = try_join_all(groups.into_iter().map(|group| {
            self.summarize_group(group, &genders, discipline, include_inactive, reference_year)
        }))
        .await?;
        timer.finish_with_info(&format!("{} groups", groups.len()));

        Ok(AgeGroupReport {
            rating_type: discipline,
            reference_year,
            groups,
        })
    }

    async fn summarize_group(
        &self,
        group: AgeGroup,
        genders: &[Gender],
        discipline: RatingDiscipline,
        include_inactive: bool,
        reference_year: i32,
    ) -> AppResult<AgeGroupStatistics> {
        let descriptor = AgeClassifier::descriptor(group, reference_year);

        // Counts cover the whole group; rosters and extremes honour the activity filter
        let mut whole_group = AgeClassifier::group_filter(group, reference_year);
        if let [gender] = genders {
            whole_group = whole_group.merge(&FilterBuilder::scope(None, Some(gender.code()))?);
        }
        let roster_scope = FilterBuilder::with_activity(whole_group.clone(), include_inactive);

        let (overview, top_players, youngest, oldest) = tokio::try_join!(
            self.run(OverviewFacet {
                population: whole_group,
            }),
            try_join_all(genders.iter().map(|gender| {
                self.top_players(&roster_scope, *gender, discipline)
            })),
            self.extreme(&roster_scope, SortSpec::descending(NumericField::BirthYear)),
            self.extreme(&roster_scope, SortSpec::ascending(NumericField::BirthYear)),
        )?;

        log_debug!(
            "Age group {}: {} records, {} active",
            group,
            overview.total,
            overview.active
        );

        Ok(AgeGroupStatistics {
            age_group: group,
            min_birth_year: descriptor.min_birth_year,
            max_birth_year: descriptor.max_birth_year,
            overview,
            top_players,
            youngest,
            oldest,
        })
    }

    async fn top_players(
        &self,
        scope: &FilterSpec,
        gender: Gender,
        discipline: RatingDiscipline,
    ) -> AppResult<GenderTopPlayers> {
        let filter = FilterBuilder::rated_in(
            scope
                .clone()
                .merge(&FilterBuilder::scope(None, Some(gender.code()))?),
            discipline,
        );
        let players = self
            .store
            .find_many(
                &filter,
                Some(SortSpec::descending(discipline.rating_field())),
                0,
                Some(TOP_PLAYERS),
            )
            .await?;

        let average_rating = if players.is_empty() {
            None
        } else {
            let sum: u64 = players
                .iter()
                .map(|player| u64::from(player.rating(discipline)))
                .sum();
            Some(round2(sum as f64 / players.len() as f64))
        };

        Ok(GenderTopPlayers {
            gender,
            average_rating,
            players,
        })
    }

    async fn extreme(&self, scope: &FilterSpec, sort: SortSpec) -> AppResult<Option<PlayerRecord>> {
        let mut records = self.store.find_many(scope, Some(sort), 0, Some(1)).await?;
        Ok(records.pop())
    }

    async fn run<F: StatisticsFacet>(&self, facet: F) -> AppResult<F::Output> {
        let specs = facet.specs();
        let results = self.store.aggregate_facets(&specs).await?;
        log_debug!(
            "Facet {} returned {} result sets",
            specs.first().map_or("-", |spec| spec.name.as_str()),
            results.len()
        );
        Ok(facet.read(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::players::domain::repositories::MockRecordStore;
    use crate::modules::players::domain::specifications::{FacetResult, FacetSpec};
    use crate::shared::domain::FixedClock;
    use crate::shared::errors::AppError;
    use tokio_test::{assert_err, assert_ok};

    fn service(store: MockRecordStore) -> StatisticsService {
        StatisticsService::new(Arc::new(store), Arc::new(FixedClock::at_year(2025)))
    }

    fn empty_results(specs: &[FacetSpec]) -> Vec<FacetResult> {
        specs.iter().map(|spec| FacetResult::empty(spec.name.clone())).collect()
    }

    #[tokio::test]
    async fn test_invalid_flag_rejected_before_store() {
        let mut store = MockRecordStore::new();
        store.expect_aggregate_facets().never();

        let request = StatisticsRequest {
            include_inactive: Some("maybe".to_string()),
        };
        let result = service(store).statistics(&request).await;

        assert!(matches!(result, Err(AppError::InvalidParameter { .. })));
    }

    #[tokio::test]
    async fn test_facet_failure_fails_report() {
        let mut store = MockRecordStore::new();
        store.expect_aggregate_facets().returning(|specs| {
            if specs.iter().any(|spec| spec.name == "titled") {
                Err(AppError::StoreFailure("connection reset".to_string()))
            } else {
                Ok(empty_results(specs))
            }
        });

        let result = service(store).statistics(&StatisticsRequest::default()).await;

        assert!(matches!(result, Err(AppError::StoreFailure(_))));
    }

    #[tokio::test]
    async fn test_empty_population_report() {
        let mut store = MockRecordStore::new();
        store
            .expect_aggregate_facets()
            .times(7)
            .returning(|specs| Ok(empty_results(specs)));

        let report = assert_ok!(service(store).statistics(&StatisticsRequest::default()).await);

        assert!(!report.include_inactive);
        assert_eq!(report.reference_year, 2025);
        assert_eq!(report.overview.total, 0);
        assert_eq!(report.ratings.standard.average, None);
        assert_eq!(report.age_buckets.len(), 15);
        assert!(report.federations.top.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_age_group_lists_valid_codes() {
        let mut store = MockRecordStore::new();
        store.expect_aggregate_facets().never();
        store.expect_find_many().never();

        let request = AgeGroupStatisticsRequest {
            age_group: Some("U9".to_string()),
            ..Default::default()
        };
        let error = assert_err!(service(store).age_group_statistics(&request).await);

        assert_eq!(error.code(), "INVALID_PARAMETER");
        assert!(error.to_string().contains("ageGroup"));
    }

    #[tokio::test]
    async fn test_single_group_single_gender() {
        let mut store = MockRecordStore::new();
        store
            .expect_aggregate_facets()
            .times(1)
            .returning(|specs| Ok(empty_results(specs)));
        // one roster query plus youngest and oldest
        store
            .expect_find_many()
            .times(3)
            .returning(|_, _, _, _| Ok(Vec::new()));

        let request = AgeGroupStatisticsRequest {
            age_group: Some("U18".to_string()),
            gender: Some("F".to_string()),
            rating_type: Some("rapid".to_string()),
            include_inactive: None,
        };
        let report = service(store).age_group_statistics(&request).await.unwrap();

        assert_eq!(report.rating_type, RatingDiscipline::Rapid);
        assert_eq!(report.groups.len(), 1);
        let group = &report.groups[0];
        assert_eq!(group.age_group, AgeGroup::U18);
        assert_eq!(group.min_birth_year, Some(2007));
        assert_eq!(group.max_birth_year, 2025);
        assert_eq!(group.top_players.len(), 1);
        assert_eq!(group.top_players[0].gender, Gender::Female);
        assert_eq!(group.top_players[0].average_rating, None);
        assert!(group.youngest.is_none());
    }
}
