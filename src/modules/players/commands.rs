//! Endpoint handlers: raw request in, response envelope out

use super::application::dto::{
    AdvancedSearchRequest, AgeGroupRankingRequest, FederationRequest, NameSearchRequest,
    RankingRequest, TitleCategoryListing, TitleCategoryRequest, TitleSummary,
};
use super::application::service::PlayerService;
use super::domain::entities::PlayerRecord;
use super::domain::services::RankedPlayer;
use super::domain::value_objects::RatingDiscipline;
use crate::log_debug;
use crate::shared::application::{respond, respond_paged, ApiResponse};

pub async fn get_player(service: &PlayerService, id: Option<&str>) -> ApiResponse<PlayerRecord> {
    log_debug!("get_player: {:?}", id);
    respond("get_player", service.get_by_id(id).await)
}

pub async fn find_player_by_fide_id(
    service: &PlayerService,
    fide_id: Option<&str>,
) -> ApiResponse<PlayerRecord> {
    respond("find_player_by_fide_id", service.find_by_exact_id(fide_id).await)
}

pub async fn search_players(
    service: &PlayerService,
    request: NameSearchRequest,
) -> ApiResponse<Vec<PlayerRecord>> {
    respond_paged("search_players", service.search_by_name(&request).await)
}

pub async fn advanced_search(
    service: &PlayerService,
    request: AdvancedSearchRequest,
) -> ApiResponse<Vec<PlayerRecord>> {
    respond_paged("advanced_search", service.advanced_search(&request).await)
}

pub async fn list_federation_players(
    service: &PlayerService,
    request: FederationRequest,
) -> ApiResponse<Vec<PlayerRecord>> {
    respond_paged(
        "list_federation_players",
        service.list_federation(&request).await,
    )
}

pub async fn standard_ranking(
    service: &PlayerService,
    request: RankingRequest,
) -> ApiResponse<Vec<RankedPlayer>> {
    respond_paged(
        "standard_ranking",
        service
            .rating_ranking(RatingDiscipline::Standard, &request)
            .await,
    )
}

pub async fn rapid_ranking(
    service: &PlayerService,
    request: RankingRequest,
) -> ApiResponse<Vec<RankedPlayer>> {
    respond_paged(
        "rapid_ranking",
        service.rating_ranking(RatingDiscipline::Rapid, &request).await,
    )
}

pub async fn blitz_ranking(
    service: &PlayerService,
    request: RankingRequest,
) -> ApiResponse<Vec<RankedPlayer>> {
    respond_paged(
        "blitz_ranking",
        service.rating_ranking(RatingDiscipline::Blitz, &request).await,
    )
}

pub async fn age_group_ranking(
    service: &PlayerService,
    request: AgeGroupRankingRequest,
) -> ApiResponse<Vec<RankedPlayer>> {
    respond_paged("age_group_ranking", service.age_group_ranking(&request).await)
}

pub async fn title_category(
    service: &PlayerService,
    request: TitleCategoryRequest,
) -> ApiResponse<TitleCategoryListing> {
    respond("title_category", service.title_category(&request).await)
}

pub async fn title_summary(service: &PlayerService) -> ApiResponse<TitleSummary> {
    respond("title_summary", service.title_summary().await)
}
