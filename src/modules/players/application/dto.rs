use serde::{Deserialize, Serialize};

use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::services::SearchParameters;
use crate::modules::players::domain::value_objects::{ActivityStatus, TitleCategory};
use crate::shared::application::PaginationParams;

// ================== REQUESTS ==================
// Every field arrives as raw text; the service validates before touching the store.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PageRequest {
    pub fn params(&self) -> PaginationParams {
        PaginationParams::from_raw(self.page.as_deref(), self.size.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameSearchRequest {
    pub q: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvancedSearchRequest {
    #[serde(flatten)]
    pub filters: SearchParameters,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FederationRequest {
    pub federation: Option<String>,
    pub gender: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    pub federation: Option<String>,
    pub gender: Option<String>,
    pub include_inactive: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupRankingRequest {
    pub age_group: Option<String>,
    pub rating_type: Option<String>,
    pub gender: Option<String>,
    pub federation: Option<String>,
    pub include_inactive: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleCategoryRequest {
    pub category: Option<String>,
    pub federation: Option<String>,
}

// ================== RESPONSES ==================

/// Record in a title-category listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitledPlayer {
    #[serde(flatten)]
    pub player: PlayerRecord,
    pub status: ActivityStatus,
    pub primary_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtypeCount {
    pub code: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleCategoryListing {
    pub category: TitleCategory,
    pub total: u64,
    /// Per sub-type counts; empty unless the category groups several codes
    pub breakdown: Vec<SubtypeCount>,
    pub players: Vec<TitledPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: TitleCategory,
    pub total: u64,
    pub breakdown: Vec<SubtypeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleSummary {
    pub categories: Vec<CategorySummary>,
}

impl TitleSummary {
    pub fn total_for(&self, category: &TitleCategory) -> Option<u64> {
        self.categories
            .iter()
            .find(|summary| &summary.category == category)
            .map(|summary| summary.total)
    }
}
