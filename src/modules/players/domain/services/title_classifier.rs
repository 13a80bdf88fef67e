use serde::Serialize;

use crate::modules::players::domain::entities::PlayerRecord;
use crate::modules::players::domain::specifications::{FilterSpec, Predicate, SetField};
use crate::modules::players::domain::value_objects::title_category::{
    ARBITER_CODES, COMPETITIVE_CODES, TRAINER_CODES,
};
use crate::modules::players::domain::value_objects::TitleCategory;

/// Sets a competitive title may appear in
pub const TITLE_SETS: [SetField; 3] = [SetField::Titles, SetField::WomenTitles, SetField::OtherTitles];

/// Category membership derived from a record's title sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleProfile {
    /// Trainer codes found in the other-titles set
    pub trainer: Vec<String>,
    /// Arbiter codes found in the other-titles set
    pub arbiter: Vec<String>,
    pub organizer: bool,
    /// Competitive titles held in any of the three title sets, in priority order
    pub competitive: Vec<String>,
}

impl TitleProfile {
    pub fn is_trainer(&self) -> bool {
        !self.trainer.is_empty()
    }

    pub fn is_arbiter(&self) -> bool {
        !self.arbiter.is_empty()
    }
}

pub struct TitleClassifier;

impl TitleClassifier {
    pub fn profile(record: &PlayerRecord) -> TitleProfile {
        TitleProfile {
            trainer: matching_codes(record, &[SetField::OtherTitles], &TRAINER_CODES),
            arbiter: matching_codes(record, &[SetField::OtherTitles], &ARBITER_CODES),
            organizer: !record.additional_designations.is_empty(),
            competitive: matching_codes(record, &TITLE_SETS, &COMPETITIVE_CODES),
        }
    }

    /// Whether `record` belongs to `category`
    pub fn belongs_to(record: &PlayerRecord, category: &TitleCategory) -> bool {
        Self::category_filter(category).matches(record)
    }

    /// Code reported as the record's primary title under `category`.
    ///
    /// Trainer codes win over arbiter codes, which win over the category's own code.
    pub fn primary_title(record: &PlayerRecord, category: &TitleCategory) -> Option<String> {
        let profile = Self::profile(record);
        if let Some(code) = profile.trainer.first() {
            return Some(code.clone());
        }
        if let Some(code) = profile.arbiter.first() {
            return Some(code.clone());
        }
        match category {
            TitleCategory::Title(code) => TITLE_SETS
                .iter()
                .any(|field| record.set_values(*field).contains(code))
                .then(|| code.clone()),
            TitleCategory::Organizers => record.additional_designations.iter().next().cloned(),
            TitleCategory::Trainers | TitleCategory::Arbiters => None,
        }
    }

    pub fn category_filter(category: &TitleCategory) -> FilterSpec {
        let predicate = match category {
            TitleCategory::Trainers => Predicate::ContainsAny(SetField::OtherTitles, owned(&TRAINER_CODES)),
            TitleCategory::Arbiters => Predicate::ContainsAny(SetField::OtherTitles, owned(&ARBITER_CODES)),
            TitleCategory::Organizers => Predicate::NonEmpty(SetField::AdditionalDesignations),
            TitleCategory::Title(code) => any_title_set(vec![code.clone()]),
        };
        FilterSpec::new().and(predicate)
    }

    /// Records holding one trainer or arbiter sub-type code
    pub fn subtype_filter(code: &str) -> FilterSpec {
        FilterSpec::new().and(Predicate::ContainsAny(
            SetField::OtherTitles,
            vec![code.to_string()],
        ))
    }

    /// Records holding at least one competitive title in any title set
    pub fn competitive_filter() -> FilterSpec {
        FilterSpec::new().and(Self::competitive_predicate())
    }

    pub fn competitive_predicate() -> Predicate {
        any_title_set(owned(&COMPETITIVE_CODES))
    }

    pub fn is_competitive_code(code: &str) -> bool {
        COMPETITIVE_CODES.contains(&code)
    }
}

fn any_title_set(codes: Vec<String>) -> Predicate {
    Predicate::AnyOf(
        TITLE_SETS
            .iter()
            .map(|field| Predicate::ContainsAny(*field, codes.clone()))
            .collect(),
    )
}

fn owned(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

fn matching_codes(record: &PlayerRecord, fields: &[SetField], codes: &[&str]) -> Vec<String> {
    codes
        .iter()
        .filter(|code| fields.iter().any(|field| record.set_values(*field).contains(**code)))
        .map(|code| code.to_string())
        .collect()
}
