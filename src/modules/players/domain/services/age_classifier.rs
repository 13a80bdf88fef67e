use crate::modules::players::domain::specifications::{FilterSpec, NumericField, Predicate};
use crate::modules::players::domain::value_objects::{AgeBucket, AgeGroup, AgeGroupDescriptor};
use crate::shared::errors::{AppError, AppResult};

/// Age derivation and age-group resolution against an explicit reference year
pub struct AgeClassifier;

impl AgeClassifier {
    /// Age in whole years; `None` without a birth year or for a birth year after `current_year`
    pub fn age(birth_year: Option<i32>, current_year: i32) -> Option<i32> {
        birth_year
            .map(|year| current_year - year)
            .filter(|age| *age >= 0)
    }

    pub fn resolve_group(parameter: &str, code: &str) -> AppResult<AgeGroup> {
        code.parse().map_err(|_| {
            let valid = AgeGroup::valid_codes();
            AppError::invalid_choice(
                parameter,
                format!(
                    "'{}' is not a valid age group; expected one of {}",
                    code,
                    valid.join(", ")
                ),
                &valid,
            )
        })
    }

    pub fn descriptor(group: AgeGroup, current_year: i32) -> AgeGroupDescriptor {
        group.descriptor(current_year)
    }

    /// Store predicate selecting records born inside the group's window
    pub fn group_filter(group: AgeGroup, current_year: i32) -> FilterSpec {
        let descriptor = group.descriptor(current_year);
        FilterSpec::new().set(Predicate::Range {
            field: NumericField::BirthYear,
            min: descriptor.min_birth_year.map(i64::from),
            max: Some(i64::from(descriptor.max_birth_year)),
        })
    }

    /// Narrowest group containing the birth year; ages 19, 30 to 39 and negative ages have none
    pub fn classify_group(birth_year: Option<i32>, current_year: i32) -> Option<AgeGroup> {
        let year = birth_year?;
        AgeGroup::ALL
            .iter()
            .copied()
            .find(|group| group.descriptor(current_year).contains(year))
    }

    pub fn classify_bucket(birth_year: Option<i32>, current_year: i32) -> Option<AgeBucket> {
        Self::age(birth_year, current_year).and_then(AgeBucket::for_age)
    }

    /// Birth-year boundaries equivalent to the age buckets, ascending.
    ///
    /// Ages `[a, b)` are birth years `[current - b + 1, current - a + 1)`. Birth
    /// years below the first boundary belong to the open top bucket.
    pub fn bucket_birth_year_boundaries(current_year: i32) -> Vec<i64> {
        let mut boundaries: Vec<i64> = AgeBucket::all()
            .iter()
            .filter_map(|bucket| bucket.max_age)
            .map(|max_age| i64::from(current_year - max_age))
            .collect();
        boundaries.push(i64::from(current_year) + 1);
        boundaries.sort_unstable();
        boundaries
    }

    /// Map a bucket lower birth-year boundary back to its age bucket
    pub fn bucket_for_lower_birth_year(lower_birth_year: i64, current_year: i32) -> Option<AgeBucket> {
        let oldest_age = i64::from(current_year) - lower_birth_year;
        i32::try_from(oldest_age).ok().and_then(AgeBucket::for_age)
    }

    /// The open top bucket (`80+`)
    pub fn top_bucket() -> AgeBucket {
        AgeBucket::all()
            .into_iter()
            .find(|bucket| bucket.max_age.is_none())
            .unwrap_or(AgeBucket {
                min_age: 80,
                max_age: None,
            })
    }
}
