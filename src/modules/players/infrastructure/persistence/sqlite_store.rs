use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use tracing::{debug, instrument};

use super::models::PlayerRow;
use super::sql_predicates::{apply_sort, filter_condition};
use crate::modules::players::domain::{
    entities::PlayerRecord,
    repositories::RecordStore,
    specifications::{
        Accumulator, FacetKey, FacetResult, FacetRow, FacetSpec, FacetValue, FilterSpec, GroupKey,
        SortSpec,
    },
};
use crate::schema::players;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation};
use crate::shared::Database;

/// Rows per INSERT statement; keeps bind counts under SQLite's variable limit
const INSERT_CHUNK_SIZE: usize = 500;

pub struct SqlitePlayerStore {
    db: Arc<Database>,
}

impl SqlitePlayerStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Load records into the table inside one transaction
    pub async fn insert_batch(&self, records: Vec<PlayerRecord>) -> AppResult<usize> {
        let db = Arc::clone(&self.db);
        let rows: Vec<PlayerRow> = records.iter().map(PlayerRow::from_record).collect();

        let inserted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let inserted = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                let mut total = 0;
                for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                    total += diesel::insert_into(players::table)
                        .values(chunk)
                        .execute(conn)?;
                }
                Ok(total)
            })?;
            Ok(inserted)
        })
        .await??;

        LogContext::store_operation("insert_batch", "players", None);
        debug!(inserted, "players inserted");
        Ok(inserted)
    }

    fn load_rows(
        conn: &mut SqliteConnection,
        filter: &FilterSpec,
        sort: Option<SortSpec>,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<PlayerRecord>> {
        let mut query = apply_sort(
            players::table.into_boxed().filter(filter_condition(filter)),
            sort,
        );
        if skip > 0 {
            query = query.offset(i64::try_from(skip).unwrap_or(i64::MAX));
        }
        if let Some(limit) = limit {
            query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        query
            .select(PlayerRow::as_select())
            .load::<PlayerRow>(conn)?
            .into_iter()
            .map(PlayerRow::into_record)
            .collect()
    }

    fn count_rows(conn: &mut SqliteConnection, filter: &FilterSpec) -> AppResult<u64> {
        let total = players::table
            .into_boxed()
            .filter(filter_condition(filter))
            .count()
            .get_result::<i64>(conn)?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// Ungrouped facets made only of counts, answered with COUNT queries.
    ///
    /// Returns `None` for facets that need the rows themselves.
    fn count_facet(conn: &mut SqliteConnection, facet: &FacetSpec) -> AppResult<Option<FacetResult>> {
        if facet.group_by != GroupKey::None {
            return Ok(None);
        }

        let mut filters = Vec::with_capacity(facet.accumulators.len());
        for accumulator in &facet.accumulators {
            match accumulator {
                Accumulator::Count => filters.push(facet.filter.clone()),
                Accumulator::CountWhere(extra) => filters.push(facet.filter.clone().merge(extra)),
                Accumulator::Average { .. } => return Ok(None),
            }
        }

        // An ungrouped facet over no records has no row at all
        if Self::count_rows(conn, &facet.filter)? == 0 {
            return Ok(Some(FacetResult::empty(facet.name.clone())));
        }

        let values = filters
            .iter()
            .map(|filter| Self::count_rows(conn, filter).map(FacetValue::Count))
            .collect::<AppResult<Vec<FacetValue>>>()?;

        Ok(Some(FacetResult {
            name: facet.name.clone(),
            rows: vec![FacetRow {
                key: FacetKey::All,
                values,
            }],
        }))
    }
}

#[async_trait]
impl RecordStore for SqlitePlayerStore {
    #[instrument(skip(self, filter))]
    async fn find_one(&self, filter: &FilterSpec) -> AppResult<Option<PlayerRecord>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> AppResult<Option<PlayerRecord>> {
            let mut conn = db.get_connection()?;
            let row = players::table
                .into_boxed()
                .filter(filter_condition(&filter))
                .order(players::id.asc())
                .select(PlayerRow::as_select())
                .first::<PlayerRow>(&mut conn)
                .optional()?;
            row.map(PlayerRow::into_record).transpose()
        })
        .await?
    }

    #[instrument(skip(self, filter))]
    async fn find_many(
        &self,
        filter: &FilterSpec,
        sort: Option<SortSpec>,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<PlayerRecord>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        let records = task::spawn_blocking(move || -> AppResult<Vec<PlayerRecord>> {
            let mut conn = db.get_connection()?;
            Self::load_rows(&mut conn, &filter, sort, skip, limit)
        })
        .await??;

        debug!(returned = records.len(), "find_many completed");
        Ok(records)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &FilterSpec) -> AppResult<u64> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> AppResult<u64> {
            let mut conn = db.get_connection()?;
            Self::count_rows(&mut conn, &filter)
        })
        .await?
    }

    /// Count-only facets run as COUNT queries. The rest group the selected rows
    /// in memory, loading each distinct facet filter once per call.
    async fn aggregate_facets(&self, facets: &[FacetSpec]) -> AppResult<Vec<FacetResult>> {
        let db = Arc::clone(&self.db);
        let facets = facets.to_vec();
        let timer = TimedOperation::new("sqlite_aggregate_facets");

        let results = task::spawn_blocking(move || -> AppResult<Vec<FacetResult>> {
            let mut conn = db.get_connection()?;
            let mut loaded: Vec<(FilterSpec, Vec<PlayerRecord>)> = Vec::new();
            let mut results = Vec::with_capacity(facets.len());

            for facet in &facets {
                if let Some(result) = Self::count_facet(&mut conn, facet)? {
                    results.push(result);
                    continue;
                }

                let index = match loaded.iter().position(|(filter, _)| filter == &facet.filter) {
                    Some(index) => index,
                    None => {
                        let records = Self::load_rows(&mut conn, &facet.filter, None, 0, None)?;
                        loaded.push((facet.filter.clone(), records));
                        loaded.len() - 1
                    }
                };
                results.push(facet.evaluate(&loaded[index].1));
            }

            debug!(loaded_filters = loaded.len(), "facet rows loaded");
            Ok(results)
        })
        .await??;

        timer.finish_with_info(&format!("{} facets", results.len()));
        Ok(results)
    }
}
