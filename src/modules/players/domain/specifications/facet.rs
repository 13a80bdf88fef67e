/// Aggregation facets evaluated by a record store
///
/// A facet selects records with its own filter, optionally groups them, and
/// computes one value per accumulator for every group. Facets are independent
/// of each other, so a store may run them in any order or concurrently.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::filter::{FilterSpec, NumericField, SetField, TextField};
use crate::modules::players::domain::entities::PlayerRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupKey {
    /// One group holding every selected record
    None,
    /// One group per distinct text value
    Field(TextField),
    /// One group per distinct code across the listed sets; a record joins each of its codes once
    Unwind(Vec<SetField>),
    /// Ascending boundaries; a group per `[b[i], b[i+1])`, the rest go to `overflow` or are dropped
    Bucket {
        field: NumericField,
        boundaries: Vec<i64>,
        overflow: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Accumulator {
    Count,
    /// Number of group members also matching the filter
    CountWhere(FilterSpec),
    /// Mean of `field` over group members matching the filter
    Average { field: NumericField, filter: FilterSpec },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub name: String,
    pub filter: FilterSpec,
    pub group_by: GroupKey,
    pub accumulators: Vec<Accumulator>,
}

impl FacetSpec {
    pub fn new(name: impl Into<String>, filter: FilterSpec) -> Self {
        Self {
            name: name.into(),
            filter,
            group_by: GroupKey::None,
            accumulators: Vec::new(),
        }
    }

    pub fn group_by(mut self, key: GroupKey) -> Self {
        self.group_by = key;
        self
    }

    pub fn accumulate(mut self, accumulator: Accumulator) -> Self {
        self.accumulators.push(accumulator);
        self
    }

    /// Group and accumulate records that already passed `self.filter`
    pub fn evaluate<'a, I>(&self, records: I) -> FacetResult
    where
        I: IntoIterator<Item = &'a PlayerRecord>,
    {
        let mut groups: BTreeMap<FacetKey, Vec<&'a PlayerRecord>> = BTreeMap::new();

        for record in records {
            for key in self.keys_for(record) {
                groups.entry(key).or_default().push(record);
            }
        }

        let rows = groups
            .into_iter()
            .map(|(key, members)| FacetRow {
                key,
                values: self
                    .accumulators
                    .iter()
                    .map(|acc| accumulate(acc, &members))
                    .collect(),
            })
            .collect();

        FacetResult {
            name: self.name.clone(),
            rows,
        }
    }

    fn keys_for(&self, record: &PlayerRecord) -> Vec<FacetKey> {
        match &self.group_by {
            GroupKey::None => vec![FacetKey::All],
            GroupKey::Field(field) => vec![FacetKey::Text(record.text_value(*field).to_string())],
            GroupKey::Unwind(fields) => fields
                .iter()
                .flat_map(|field| record.set_values(*field).iter())
                .cloned()
                .collect::<BTreeSet<String>>()
                .into_iter()
                .map(FacetKey::Text)
                .collect(),
            GroupKey::Bucket {
                field,
                boundaries,
                overflow,
            } => match record.numeric_value(*field) {
                None => Vec::new(),
                Some(value) => match bucket_lower_bound(boundaries, value) {
                    Some(lower) => vec![FacetKey::Bucket(lower)],
                    None => overflow
                        .iter()
                        .map(|label| FacetKey::Overflow(label.clone()))
                        .collect(),
                },
            },
        }
    }
}

fn bucket_lower_bound(boundaries: &[i64], value: i64) -> Option<i64> {
    boundaries
        .windows(2)
        .find(|pair| value >= pair[0] && value < pair[1])
        .map(|pair| pair[0])
}

fn accumulate(accumulator: &Accumulator, members: &[&PlayerRecord]) -> FacetValue {
    match accumulator {
        Accumulator::Count => FacetValue::Count(members.len() as u64),
        Accumulator::CountWhere(filter) => {
            FacetValue::Count(members.iter().filter(|r| filter.matches(r)).count() as u64)
        }
        Accumulator::Average { field, filter } => {
            let values: Vec<i64> = members
                .iter()
                .filter(|r| filter.matches(r))
                .filter_map(|r| r.numeric_value(*field))
                .collect();
            if values.is_empty() {
                FacetValue::Average(None)
            } else {
                let sum: i64 = values.iter().sum();
                FacetValue::Average(Some(sum as f64 / values.len() as f64))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacetKey {
    All,
    Text(String),
    /// Lower boundary of the bucket
    Bucket(i64),
    Overflow(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FacetValue {
    Count(u64),
    Average(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetRow {
    pub key: FacetKey,
    /// One value per accumulator, in declaration order
    pub values: Vec<FacetValue>,
}

impl FacetRow {
    pub fn count_at(&self, index: usize) -> u64 {
        match self.values.get(index) {
            Some(FacetValue::Count(count)) => *count,
            _ => 0,
        }
    }

    pub fn average_at(&self, index: usize) -> Option<f64> {
        match self.values.get(index) {
            Some(FacetValue::Average(avg)) => *avg,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    pub name: String,
    pub rows: Vec<FacetRow>,
}

impl FacetResult {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// The single row of an ungrouped facet, if any record matched
    pub fn single(&self) -> Option<&FacetRow> {
        self.rows.iter().find(|row| row.key == FacetKey::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::players::domain::specifications::Predicate;
    use crate::modules::players::domain::value_objects::Gender;

    fn population() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("1", "A", "NOR", Gender::Male)
                .with_ratings(2800, 0, 2700)
                .with_titles(&["GM"])
                .with_birth_year(1990),
            PlayerRecord::new("2", "B", "NOR", Gender::Female)
                .with_ratings(2400, 0, 0)
                .with_titles(&["IM"])
                .with_women_titles(&["WGM"])
                .with_birth_year(2010),
            PlayerRecord::new("3", "C", "IND", Gender::Male),
        ]
    }

    #[test]
    fn test_group_by_field_counts() {
        let records = population();
        let spec = FacetSpec::new("federations", FilterSpec::all())
            .group_by(GroupKey::Field(TextField::Federation))
            .accumulate(Accumulator::Count);
        let result = spec.evaluate(&records);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].key, FacetKey::Text("IND".into()));
        assert_eq!(result.rows[0].count_at(0), 1);
        assert_eq!(result.rows[1].count_at(0), 2);
    }

    #[test]
    fn test_unwind_counts_each_code_once_per_record() {
        let records = population();
        let spec = FacetSpec::new("titles", FilterSpec::all())
            .group_by(GroupKey::Unwind(vec![SetField::Titles, SetField::WomenTitles]))
            .accumulate(Accumulator::Count)
            .accumulate(Accumulator::CountWhere(
                FilterSpec::new().and(Predicate::Equals(TextField::Gender, "F".into())),
            ));
        let result = spec.evaluate(&records);
        let keys: Vec<_> = result.rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                FacetKey::Text("GM".into()),
                FacetKey::Text("IM".into()),
                FacetKey::Text("WGM".into())
            ]
        );
        assert_eq!(result.rows[1].count_at(1), 1);
    }

    #[test]
    fn test_average_skips_non_matching() {
        let records = population();
        let spec = FacetSpec::new("avg", FilterSpec::all()).accumulate(Accumulator::Average {
            field: NumericField::BlitzRating,
            filter: FilterSpec::new().and(Predicate::Range {
                field: NumericField::BlitzRating,
                min: Some(1),
                max: None,
            }),
        });
        let result = spec.evaluate(&records);
        assert_eq!(result.single().unwrap().average_at(0), Some(2700.0));
    }

    #[test]
    fn test_bucket_and_overflow() {
        let records = population();
        let spec = FacetSpec::new("ages", FilterSpec::all())
            .group_by(GroupKey::Bucket {
                field: NumericField::BirthYear,
                boundaries: vec![2000, 2020],
                overflow: Some("older".into()),
            })
            .accumulate(Accumulator::Count);
        let result = spec.evaluate(&records);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].key, FacetKey::Bucket(2000));
        assert_eq!(result.rows[1].key, FacetKey::Overflow("older".into()));
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let spec = FacetSpec::new("none", FilterSpec::all()).accumulate(Accumulator::Count);
        let result = spec.evaluate(std::iter::empty());
        assert!(result.single().is_none());
    }
}
