pub mod facets;
pub mod report;

pub use facets::{
    population, AgeBucketFacet, FederationFacet, GenderFacet, OverviewFacet, RatingAverageFacet,
    RatingPresenceFacet, StatisticsFacet, TitleFacet, TOP_FEDERATIONS,
};
pub use report::{AgeGroupReport, AgeGroupStatistics, GenderTopPlayers, StatisticsReport};
