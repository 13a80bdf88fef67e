use serde::{Serialize, Serializer};
use std::fmt;

use crate::shared::errors::{AppError, AppResult};

pub const TRAINER_CODES: [&str; 5] = ["FST", "FT", "SI", "NI", "DI"];
pub const ARBITER_CODES: [&str; 3] = ["IA", "FA", "NA"];
/// Competitive titles in priority order
pub const COMPETITIVE_CODES: [&str; 8] = ["GM", "WGM", "IM", "WIM", "FM", "WFM", "CM", "WCM"];

const MAX_CODE_LENGTH: usize = 6;

/// Key accepted by the title-category lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TitleCategory {
    Trainers,
    Arbiters,
    Organizers,
    /// One specific code, matched across all three title sets
    Title(String),
}

impl TitleCategory {
    pub fn parse_parameter(parameter: &str, raw: &str) -> AppResult<Self> {
        let key = raw.trim();
        match key.to_lowercase().as_str() {
            "trainers" => Ok(TitleCategory::Trainers),
            "arbiters" => Ok(TitleCategory::Arbiters),
            "organizers" => Ok(TitleCategory::Organizers),
            _ => {
                let valid = !key.is_empty()
                    && key.len() <= MAX_CODE_LENGTH
                    && key.chars().all(|c| c.is_ascii_alphanumeric());
                if valid {
                    Ok(TitleCategory::Title(key.to_uppercase()))
                } else {
                    Err(AppError::invalid_parameter(
                        parameter,
                        format!(
                            "'{}' is not a title category (trainers, arbiters, organizers) or title code",
                            raw
                        ),
                    ))
                }
            }
        }
    }

    pub fn key(&self) -> String {
        match self {
            TitleCategory::Trainers => "trainers".to_string(),
            TitleCategory::Arbiters => "arbiters".to_string(),
            TitleCategory::Organizers => "organizers".to_string(),
            TitleCategory::Title(code) => code.to_lowercase(),
        }
    }

    /// Sub-type codes reported in the per-category breakdown
    pub fn subtype_codes(&self) -> &'static [&'static str] {
        match self {
            TitleCategory::Trainers => &TRAINER_CODES,
            TitleCategory::Arbiters => &ARBITER_CODES,
            TitleCategory::Organizers | TitleCategory::Title(_) => &[],
        }
    }
}

impl fmt::Display for TitleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for TitleCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}
