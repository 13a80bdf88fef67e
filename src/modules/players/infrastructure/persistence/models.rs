use diesel::prelude::*;

use crate::modules::players::domain::entities::{PlayerRecord, TitleSet};
use crate::modules::players::domain::value_objects::Gender;
use crate::schema::players;
use crate::shared::errors::{AppError, AppResult};

/// Row of the `players` table, fields in column order
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct PlayerRow {
    pub id: String,
    pub name: String,
    pub federation: String,
    pub gender: String,
    pub titles: String,
    pub women_titles: String,
    pub other_titles: String,
    pub additional_designations: String,
    pub standard_rating: i32,
    pub rapid_rating: i32,
    pub blitz_rating: i32,
    pub standard_games: i32,
    pub rapid_games: i32,
    pub blitz_games: i32,
    pub standard_k: i32,
    pub rapid_k: i32,
    pub blitz_k: i32,
    pub birth_year: Option<i32>,
    pub activity_flag: String,
}

impl PlayerRow {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            federation: record.federation.clone(),
            gender: record.gender.code().to_string(),
            titles: encode_set(&record.titles),
            women_titles: encode_set(&record.women_titles),
            other_titles: encode_set(&record.other_titles),
            additional_designations: encode_set(&record.additional_designations),
            standard_rating: to_column(record.standard_rating),
            rapid_rating: to_column(record.rapid_rating),
            blitz_rating: to_column(record.blitz_rating),
            standard_games: to_column(record.standard_games),
            rapid_games: to_column(record.rapid_games),
            blitz_games: to_column(record.blitz_games),
            standard_k: to_column(record.standard_k),
            rapid_k: to_column(record.rapid_k),
            blitz_k: to_column(record.blitz_k),
            birth_year: record.birth_year,
            activity_flag: record.activity_flag.clone().unwrap_or_default(),
        }
    }

    pub fn into_record(self) -> AppResult<PlayerRecord> {
        let gender: Gender = self.gender.parse().map_err(|e: String| {
            AppError::StoreFailure(format!("Player {} has a corrupt gender column: {}", self.id, e))
        })?;

        Ok(PlayerRecord {
            id: self.id,
            name: self.name,
            federation: self.federation,
            gender,
            titles: decode_set(&self.titles),
            women_titles: decode_set(&self.women_titles),
            other_titles: decode_set(&self.other_titles),
            additional_designations: decode_set(&self.additional_designations),
            standard_rating: from_column(self.standard_rating),
            rapid_rating: from_column(self.rapid_rating),
            blitz_rating: from_column(self.blitz_rating),
            standard_games: from_column(self.standard_games),
            rapid_games: from_column(self.rapid_games),
            blitz_games: from_column(self.blitz_games),
            standard_k: from_column(self.standard_k),
            rapid_k: from_column(self.rapid_k),
            blitz_k: from_column(self.blitz_k),
            birth_year: self.birth_year,
            activity_flag: Some(self.activity_flag).filter(|flag| !flag.is_empty()),
        })
    }
}

/// `{GM, IM}` is stored as `,GM,IM,` so a single code matches `%,GM,%`
pub fn encode_set(set: &TitleSet) -> String {
    if set.is_empty() {
        String::new()
    } else {
        let joined: Vec<&str> = set.iter().map(String::as_str).collect();
        format!(",{},", joined.join(","))
    }
}

pub fn decode_set(raw: &str) -> TitleSet {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_column(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
