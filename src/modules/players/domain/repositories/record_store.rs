use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::specifications::{
    FacetResult, FacetSpec, FilterSpec, SortSpec,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Read-only access to the player population.
///
/// Implementations break ties in `find_many` sorting by ascending id and
/// return facet results in the order the specs were given.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_one(&self, filter: &FilterSpec) -> AppResult<Option<PlayerRecord>>;

    /// `limit: None` returns every matching record after `skip`
    async fn find_many(
        &self,
        filter: &FilterSpec,
        sort: Option<SortSpec>,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<PlayerRecord>>;

    async fn count(&self, filter: &FilterSpec) -> AppResult<u64>;

    async fn aggregate_facets(&self, facets: &[FacetSpec]) -> AppResult<Vec<FacetResult>>;
}
