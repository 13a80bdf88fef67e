use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::players::domain::specifications::NumericField;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingDiscipline {
    #[default]
    Standard,
    Rapid,
    Blitz,
}

impl RatingDiscipline {
    pub const ALL: [RatingDiscipline; 3] = [
        RatingDiscipline::Standard,
        RatingDiscipline::Rapid,
        RatingDiscipline::Blitz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingDiscipline::Standard => "standard",
            RatingDiscipline::Rapid => "rapid",
            RatingDiscipline::Blitz => "blitz",
        }
    }

    pub fn rating_field(&self) -> NumericField {
        match self {
            RatingDiscipline::Standard => NumericField::StandardRating,
            RatingDiscipline::Rapid => NumericField::RapidRating,
            RatingDiscipline::Blitz => NumericField::BlitzRating,
        }
    }

    /// Parse the optional `ratingType` parameter; absent means standard
    pub fn parse_parameter(parameter: &str, raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(RatingDiscipline::default()),
            Some(value) => value.parse().map_err(|_| {
                AppError::invalid_parameter(
                    parameter,
                    format!("'{}' must be one of standard, rapid, blitz", value),
                )
            }),
        }
    }
}

impl fmt::Display for RatingDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RatingDiscipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(RatingDiscipline::Standard),
            "rapid" => Ok(RatingDiscipline::Rapid),
            "blitz" => Ok(RatingDiscipline::Blitz),
            _ => Err(format!("Invalid rating type: {}", s)),
        }
    }
}
