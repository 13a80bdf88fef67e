use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;

use crate::log_debug;
use crate::modules::players::domain::{
    entities::PlayerRecord,
    repositories::RecordStore,
    specifications::{FacetResult, FacetSpec, FilterSpec, SortDirection, SortSpec},
};
use crate::shared::errors::AppResult;

/// Record store over a fixed in-process population
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Vec<PlayerRecord>>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching<'a>(&'a self, filter: &'a FilterSpec) -> impl Iterator<Item = &'a PlayerRecord> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }
}

fn compare(a: &PlayerRecord, b: &PlayerRecord, sort: SortSpec) -> Ordering {
    let primary = a.numeric_value(sort.field).cmp(&b.numeric_value(sort.field));
    let primary = match sort.direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_one(&self, filter: &FilterSpec) -> AppResult<Option<PlayerRecord>> {
        Ok(self.matching(filter).min_by(|a, b| a.id.cmp(&b.id)).cloned())
    }

    async fn find_many(
        &self,
        filter: &FilterSpec,
        sort: Option<SortSpec>,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<PlayerRecord>> {
        let mut selected: Vec<&PlayerRecord> = self.matching(filter).collect();
        match sort {
            Some(sort) => selected.sort_by(|a, b| compare(a, b, sort)),
            None => selected.sort_by(|a, b| a.id.cmp(&b.id)),
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        let page: Vec<PlayerRecord> = selected
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        log_debug!("In-memory find_many returned {} records", page.len());
        Ok(page)
    }

    async fn count(&self, filter: &FilterSpec) -> AppResult<u64> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn aggregate_facets(&self, facets: &[FacetSpec]) -> AppResult<Vec<FacetResult>> {
        Ok(facets
            .iter()
            .map(|facet| facet.evaluate(self.matching(&facet.filter)))
            .collect())
    }
}
