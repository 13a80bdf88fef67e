use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRequest {
    pub include_inactive: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupStatisticsRequest {
    /// All groups when absent
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub rating_type: Option<String>,
    pub include_inactive: Option<String>,
}
