use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::modules::players::domain::specifications::{NumericField, SetField, TextField};
use crate::modules::players::domain::value_objects::{ActivityStatus, Gender, RatingDiscipline};

pub type TitleSet = BTreeSet<String>;

/// One rated player as held by the record store
///
/// A rating of 0 means "unrated in that discipline". `birth_year` is absent
/// for records with no derivable age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub federation: String,
    pub gender: Gender,
    #[serde(default)]
    pub titles: TitleSet,
    #[serde(default)]
    pub women_titles: TitleSet,
    #[serde(default)]
    pub other_titles: TitleSet,
    #[serde(default)]
    pub additional_designations: TitleSet,
    #[serde(default)]
    pub standard_rating: u32,
    #[serde(default)]
    pub rapid_rating: u32,
    #[serde(default)]
    pub blitz_rating: u32,
    #[serde(default)]
    pub standard_games: u32,
    #[serde(default)]
    pub rapid_games: u32,
    #[serde(default)]
    pub blitz_games: u32,
    #[serde(default)]
    pub standard_k: u32,
    #[serde(default)]
    pub rapid_k: u32,
    #[serde(default)]
    pub blitz_k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_flag: Option<String>,
}

impl PlayerRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        federation: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            federation: federation.into(),
            gender,
            titles: TitleSet::new(),
            women_titles: TitleSet::new(),
            other_titles: TitleSet::new(),
            additional_designations: TitleSet::new(),
            standard_rating: 0,
            rapid_rating: 0,
            blitz_rating: 0,
            standard_games: 0,
            rapid_games: 0,
            blitz_games: 0,
            standard_k: 0,
            rapid_k: 0,
            blitz_k: 0,
            birth_year: None,
            activity_flag: None,
        }
    }

    pub fn with_ratings(mut self, standard: u32, rapid: u32, blitz: u32) -> Self {
        self.standard_rating = standard;
        self.rapid_rating = rapid;
        self.blitz_rating = blitz;
        self
    }

    pub fn with_games(mut self, standard: u32, rapid: u32, blitz: u32) -> Self {
        self.standard_games = standard;
        self.rapid_games = rapid;
        self.blitz_games = blitz;
        self
    }

    pub fn with_k_factors(mut self, standard: u32, rapid: u32, blitz: u32) -> Self {
        self.standard_k = standard;
        self.rapid_k = rapid;
        self.blitz_k = blitz;
        self
    }

    pub fn with_titles(mut self, codes: &[&str]) -> Self {
        self.titles = to_set(codes);
        self
    }

    pub fn with_women_titles(mut self, codes: &[&str]) -> Self {
        self.women_titles = to_set(codes);
        self
    }

    pub fn with_other_titles(mut self, codes: &[&str]) -> Self {
        self.other_titles = to_set(codes);
        self
    }

    pub fn with_designations(mut self, codes: &[&str]) -> Self {
        self.additional_designations = to_set(codes);
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn with_activity_flag(mut self, flag: &str) -> Self {
        self.activity_flag = Some(flag.to_string());
        self
    }

    pub fn status(&self) -> ActivityStatus {
        ActivityStatus::from_flag(self.activity_flag.as_deref())
    }

    pub fn rating(&self, discipline: RatingDiscipline) -> u32 {
        match discipline {
            RatingDiscipline::Standard => self.standard_rating,
            RatingDiscipline::Rapid => self.rapid_rating,
            RatingDiscipline::Blitz => self.blitz_rating,
        }
    }

    pub fn text_value(&self, field: TextField) -> &str {
        match field {
            TextField::Id => &self.id,
            TextField::Name => &self.name,
            TextField::Federation => &self.federation,
            TextField::Gender => self.gender.code(),
            TextField::ActivityFlag => self.activity_flag.as_deref().unwrap_or(""),
        }
    }

    pub fn numeric_value(&self, field: NumericField) -> Option<i64> {
        match field {
            NumericField::StandardRating => Some(i64::from(self.standard_rating)),
            NumericField::RapidRating => Some(i64::from(self.rapid_rating)),
            NumericField::BlitzRating => Some(i64::from(self.blitz_rating)),
            NumericField::BirthYear => self.birth_year.map(i64::from),
        }
    }

    pub fn set_values(&self, field: SetField) -> &TitleSet {
        match field {
            SetField::Titles => &self.titles,
            SetField::WomenTitles => &self.women_titles,
            SetField::OtherTitles => &self.other_titles,
            SetField::AdditionalDesignations => &self.additional_designations,
        }
    }
}

fn to_set(codes: &[&str]) -> TitleSet {
    codes.iter().map(|c| c.to_string()).collect()
}
