use serde::Serialize;

use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::value_objects::AgeGroup;
use crate::shared::application::PaginationParams;

use super::age_classifier::AgeClassifier;

/// A record in ranking order with its global rank
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub rank: u64,
    #[serde(flatten)]
    pub player: PlayerRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
}

/// Numbers an already sorted page; never re-sorts
pub struct RankingAssigner;

impl RankingAssigner {
    /// `rank = page * size + index + 1`
    pub fn assign(records: Vec<PlayerRecord>, params: &PaginationParams) -> Vec<RankedPlayer> {
        let first_rank = params.offset() + 1;
        records
            .into_iter()
            .enumerate()
            .map(|(index, player)| RankedPlayer {
                rank: first_rank + index as u64,
                player,
                age: None,
                age_group: None,
            })
            .collect()
    }

    /// Rank a page of an age-group ranking, annotating each row with its age
    pub fn assign_with_age(
        records: Vec<PlayerRecord>,
        params: &PaginationParams,
        group: AgeGroup,
        current_year: i32,
    ) -> Vec<RankedPlayer> {
        Self::assign(records, params)
            .into_iter()
            .map(|mut ranked| {
                ranked.age = AgeClassifier::age(ranked.player.birth_year, current_year);
                ranked.age_group = Some(group);
                ranked
            })
            .collect()
    }
}
