use std::sync::Arc;

use futures::future::try_join_all;

use super::dto::{
    AdvancedSearchRequest, AgeGroupRankingRequest, CategorySummary, FederationRequest,
    NameSearchRequest, RankingRequest, SubtypeCount, TitleCategoryListing, TitleCategoryRequest,
    TitleSummary, TitledPlayer,
};
use crate::modules::players::domain::{
    entities::PlayerRecord,
    repositories::RecordStore,
    services::{AgeClassifier, FilterBuilder, RankedPlayer, RankingAssigner, TitleClassifier},
    specifications::{FilterSpec, NumericField, SortSpec},
    value_objects::{title_category::COMPETITIVE_CODES, RatingDiscipline, TitleCategory},
};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::domain::Clock;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_info};

/// Player lookups, searches, rankings and title-category listings
pub struct PlayerService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn get_by_id(&self, id: Option<&str>) -> AppResult<PlayerRecord> {
        self.lookup("id", id).await
    }

    /// Query-parameter form of the id lookup
    pub async fn find_by_exact_id(&self, fide_id: Option<&str>) -> AppResult<PlayerRecord> {
        self.lookup("fideId", fide_id).await
    }

    async fn lookup(&self, parameter: &str, id: Option<&str>) -> AppResult<PlayerRecord> {
        let id = Validator::require_text(parameter, id)?;

        self.store
            .find_one(&FilterBuilder::exact_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player with id '{}' not found", id)))
    }

    /// Case-insensitive name substring search
    pub async fn search_by_name(
        &self,
        request: &NameSearchRequest,
    ) -> AppResult<PaginatedResult<PlayerRecord>> {
        let term = Validator::require_text("q", request.q.as_deref())?;
        let params = request.page.params();
        let filter = FilterBuilder::name_search(term);

        self.page(&format!("name ~ {}", term), &filter, params).await
    }

    pub async fn advanced_search(
        &self,
        request: &AdvancedSearchRequest,
    ) -> AppResult<PaginatedResult<PlayerRecord>> {
        let filter = FilterBuilder::build(&request.filters)?;
        let params = request.page.params();

        self.page("advanced search", &filter, params).await
    }

    pub async fn list_federation(
        &self,
        request: &FederationRequest,
    ) -> AppResult<PaginatedResult<PlayerRecord>> {
        let federation = Validator::require_text("federation", request.federation.as_deref())?;
        let filter = FilterBuilder::scope(Some(federation), request.gender.as_deref())?;
        let params = request.page.params();

        self.page(&format!("federation {}", federation), &filter, params).await
    }

    /// Top players of one discipline, rated records only
    pub async fn rating_ranking(
        &self,
        discipline: RatingDiscipline,
        request: &RankingRequest,
    ) -> AppResult<PaginatedResult<RankedPlayer>> {
        let include_inactive =
            Validator::parse_flag("includeInactive", request.include_inactive.as_deref(), false)?;
        let scope = FilterBuilder::scope(request.federation.as_deref(), request.gender.as_deref())?;
        let filter = FilterBuilder::rated_in(
            FilterBuilder::with_activity(scope, include_inactive),
            discipline,
        );
        let params = request.page.params();

        let (records, total) = self
            .sorted_page(&filter, SortSpec::descending(discipline.rating_field()), &params)
            .await?;
        LogContext::query_operation(
            &format!("{} ranking", discipline),
            Some(records.len()),
            Some(total),
        );

        let ranked = RankingAssigner::assign(records, &params);
        Ok(PaginatedResult::new(ranked, total, &params))
    }

    /// Ranking restricted to one age group; rows carry age and group code
    pub async fn age_group_ranking(
        &self,
        request: &AgeGroupRankingRequest,
    ) -> AppResult<PaginatedResult<RankedPlayer>> {
        let code = Validator::require_text("ageGroup", request.age_group.as_deref())?;
        let group = AgeClassifier::resolve_group("ageGroup", code)?;
        let discipline =
            RatingDiscipline::parse_parameter("ratingType", request.rating_type.as_deref())?;
        let include_inactive =
            Validator::parse_flag("includeInactive", request.include_inactive.as_deref(), false)?;
        let scope = FilterBuilder::scope(request.federation.as_deref(), request.gender.as_deref())?;

        let current_year = self.clock.current_year();
        let filter = FilterBuilder::rated_in(
            FilterBuilder::with_activity(scope, include_inactive),
            discipline,
        )
        .merge(&AgeClassifier::group_filter(group, current_year));
        let params = request.page.params();

        let (records, total) = self
            .sorted_page(&filter, SortSpec::descending(discipline.rating_field()), &params)
            .await?;
        log_debug!(
            "Age group {} ({}) ranking: {} of {} records",
            group,
            discipline,
            records.len(),
            total
        );

        let ranked = RankingAssigner::assign_with_age(records, &params, group, current_year);
        Ok(PaginatedResult::new(ranked, total, &params))
    }

    /// All records of a title category with status and primary title
    pub async fn title_category(
        &self,
        request: &TitleCategoryRequest,
    ) -> AppResult<TitleCategoryListing> {
        let raw = Validator::require_text("category", request.category.as_deref())?;
        let category = TitleCategory::parse_parameter("category", raw)?;
        let mut filter = TitleClassifier::category_filter(&category);
        if let Some(federation) = Validator::present(request.federation.as_deref()) {
            filter = filter.set(FilterBuilder::federation("federation", federation)?);
        }

        let records = self
            .store
            .find_many(
                &filter,
                Some(SortSpec::descending(NumericField::StandardRating)),
                0,
                None,
            )
            .await?;

        let breakdown = category
            .subtype_codes()
            .iter()
            .map(|code| SubtypeCount {
                code: code.to_string(),
                count: records
                    .iter()
                    .filter(|record| record.other_titles.contains(*code))
                    .count() as u64,
            })
            .collect();

        let players: Vec<TitledPlayer> = records
            .into_iter()
            .map(|player| TitledPlayer {
                status: player.status(),
                primary_title: TitleClassifier::primary_title(&player, &category),
                player,
            })
            .collect();

        log_info!("Title category '{}' matched {} players", category, players.len());

        Ok(TitleCategoryListing {
            category,
            total: players.len() as u64,
            breakdown,
            players,
        })
    }

    /// Totals for every title category, counted concurrently
    pub async fn title_summary(&self) -> AppResult<TitleSummary> {
        let mut categories = vec![
            TitleCategory::Trainers,
            TitleCategory::Arbiters,
            TitleCategory::Organizers,
        ];
        categories.extend(
            COMPETITIVE_CODES
                .iter()
                .map(|code| TitleCategory::Title(code.to_string())),
        );

        let summaries =
            try_join_all(categories.into_iter().map(|category| self.summarize(category))).await?;

        Ok(TitleSummary {
            categories: summaries,
        })
    }

    async fn summarize(&self, category: TitleCategory) -> AppResult<CategorySummary> {
        let total_filter = TitleClassifier::category_filter(&category);
        let total = self.store.count(&total_filter);
        let breakdown = try_join_all(category.subtype_codes().iter().map(|code| async move {
            let count = self.store.count(&TitleClassifier::subtype_filter(code)).await?;
            Ok::<_, AppError>(SubtypeCount {
                code: code.to_string(),
                count,
            })
        }));

        let (total, breakdown) = futures::try_join!(total, breakdown)?;

        Ok(CategorySummary {
            category,
            total,
            breakdown,
        })
    }

    async fn page(
        &self,
        label: &str,
        filter: &FilterSpec,
        params: PaginationParams,
    ) -> AppResult<PaginatedResult<PlayerRecord>> {
        let (records, total) = self
            .sorted_page(filter, SortSpec::descending(NumericField::StandardRating), &params)
            .await?;
        LogContext::query_operation(label, Some(records.len()), Some(total));
        Ok(PaginatedResult::new(records, total, &params))
    }

    async fn sorted_page(
        &self,
        filter: &FilterSpec,
        sort: SortSpec,
        params: &PaginationParams,
    ) -> AppResult<(Vec<PlayerRecord>, u64)> {
        let records = self
            .store
            .find_many(filter, Some(sort), params.offset(), Some(params.limit()));
        let total = self.store.count(filter);
        tokio::try_join!(records, total)
    }
}
