/// Predicate specifications evaluated by a record store
///
/// A `FilterSpec` is a conjunction of predicates over typed fields. Stores
/// translate each predicate kind into their own query language; the
/// in-memory evaluation here is the reference behaviour.
use serde::{Deserialize, Serialize};

use crate::modules::players::domain::entities::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextField {
    Id,
    Name,
    Federation,
    Gender,
    ActivityFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericField {
    StandardRating,
    RapidRating,
    BlitzRating,
    BirthYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SetField {
    Titles,
    WomenTitles,
    OtherTitles,
    AdditionalDesignations,
}

/// Dimension a predicate constrains; a later predicate on the same dimension replaces it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    Text(TextField),
    Numeric(NumericField),
    Set(SetField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Exact text match
    Equals(TextField, String),
    /// Text value is one of the listed values
    InSet(TextField, Vec<String>),
    /// Multi-valued field shares at least one value with the list
    ContainsAny(SetField, Vec<String>),
    /// Inclusive numeric range; an absent value never matches
    Range {
        field: NumericField,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Numeric value is present
    Exists(NumericField),
    /// Multi-valued field has at least one value
    NonEmpty(SetField),
    /// Case-insensitive substring match
    Substring(TextField, String),
    /// At least one of the nested predicates holds
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn target(&self) -> Option<FilterTarget> {
        match self {
            Predicate::Equals(field, _)
            | Predicate::InSet(field, _)
            | Predicate::Substring(field, _) => Some(FilterTarget::Text(*field)),
            Predicate::Range { field, .. } | Predicate::Exists(field) => {
                Some(FilterTarget::Numeric(*field))
            }
            Predicate::ContainsAny(field, _) | Predicate::NonEmpty(field) => {
                Some(FilterTarget::Set(*field))
            }
            Predicate::AnyOf(_) => None,
        }
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            Predicate::Equals(field, value) => record.text_value(*field) == value,
            Predicate::InSet(field, values) => {
                let actual = record.text_value(*field);
                values.iter().any(|v| v == actual)
            }
            Predicate::ContainsAny(field, values) => {
                let set = record.set_values(*field);
                values.iter().any(|v| set.contains(v))
            }
            Predicate::Range { field, min, max } => match record.numeric_value(*field) {
                Some(value) => {
                    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
                }
                None => false,
            },
            Predicate::Exists(field) => record.numeric_value(*field).is_some(),
            Predicate::NonEmpty(field) => !record.set_values(*field).is_empty(),
            Predicate::Substring(field, needle) => record
                .text_value(*field)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Predicate::AnyOf(predicates) => predicates.iter().any(|p| p.matches(record)),
        }
    }
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::default()
    }

    /// Add a predicate, replacing any earlier predicate on the same dimension
    pub fn set(mut self, predicate: Predicate) -> Self {
        if let Some(target) = predicate.target() {
            self.predicates.retain(|p| p.target() != Some(target));
        }
        self.predicates.push(predicate);
        self
    }

    /// Add a predicate alongside whatever is already present
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Combine two specifications into one conjunction
    pub fn merge(mut self, other: &FilterSpec) -> Self {
        self.predicates.extend(other.predicates.iter().cloned());
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-key sort; stores break ties by ascending id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: NumericField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn descending(field: NumericField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    pub fn ascending(field: NumericField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::players::domain::value_objects::Gender;

    fn magnus() -> PlayerRecord {
        PlayerRecord::new("1503014", "Carlsen, Magnus", "NOR", Gender::Male)
            .with_ratings(2830, 2780, 2880)
            .with_titles(&["GM"])
            .with_birth_year(1990)
    }

    #[test]
    fn test_set_replaces_same_dimension() {
        let spec = FilterSpec::new()
            .set(Predicate::ContainsAny(SetField::Titles, vec!["IM".to_string()]))
            .set(Predicate::NonEmpty(SetField::Titles));
        assert_eq!(spec.predicates(), &[Predicate::NonEmpty(SetField::Titles)]);
    }

    #[test]
    fn test_and_keeps_both() {
        let spec = FilterSpec::new()
            .and(Predicate::Exists(NumericField::BirthYear))
            .and(Predicate::Range {
                field: NumericField::BirthYear,
                min: Some(1980),
                max: None,
            });
        assert_eq!(spec.predicates().len(), 2);
        assert!(spec.matches(&magnus()));
    }

    #[test]
    fn test_predicate_kinds() {
        let record = magnus();
        assert!(Predicate::Equals(TextField::Federation, "NOR".into()).matches(&record));
        assert!(!Predicate::Equals(TextField::Federation, "nor".into()).matches(&record));
        assert!(Predicate::InSet(TextField::ActivityFlag, vec!["".into(), "w".into()]).matches(&record));
        assert!(Predicate::ContainsAny(SetField::Titles, vec!["IM".into(), "GM".into()]).matches(&record));
        assert!(!Predicate::NonEmpty(SetField::OtherTitles).matches(&record));
        assert!(Predicate::Substring(TextField::Name, "MAGNUS".into()).matches(&record));
        assert!(Predicate::Range {
            field: NumericField::StandardRating,
            min: Some(2800),
            max: Some(2830),
        }
        .matches(&record));
    }

    #[test]
    fn test_absent_birth_year_never_matches_range() {
        let record = PlayerRecord::new("1", "Unknown", "NEP", Gender::Female);
        let range = Predicate::Range {
            field: NumericField::BirthYear,
            min: None,
            max: Some(3000),
        };
        assert!(!range.matches(&record));
        assert!(!Predicate::Exists(NumericField::BirthYear).matches(&record));
    }

    #[test]
    fn test_any_of() {
        let record = PlayerRecord::new("2", "Arbiter", "IND", Gender::Male).with_other_titles(&["IA"]);
        let any = Predicate::AnyOf(vec![
            Predicate::ContainsAny(SetField::Titles, vec!["IA".into()]),
            Predicate::ContainsAny(SetField::OtherTitles, vec!["IA".into()]),
        ]);
        assert!(any.matches(&record));
        assert!(!Predicate::AnyOf(vec![]).matches(&record));
    }
}
