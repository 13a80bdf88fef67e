//! Statistics endpoint handlers

use super::application::dto::{AgeGroupStatisticsRequest, StatisticsRequest};
use super::application::service::StatisticsService;
use super::domain::report::{AgeGroupReport, StatisticsReport};
use crate::log_debug;
use crate::shared::application::{respond, ApiResponse};

pub async fn get_statistics(
    service: &StatisticsService,
    request: StatisticsRequest,
) -> ApiResponse<StatisticsReport> {
    log_debug!("get_statistics: includeInactive={:?}", request.include_inactive);
    respond("get_statistics", service.statistics(&request).await)
}

pub async fn get_age_group_statistics(
    service: &StatisticsService,
    request: AgeGroupStatisticsRequest,
) -> ApiResponse<AgeGroupReport> {
    respond(
        "get_age_group_statistics",
        service.age_group_statistics(&request).await,
    )
}
