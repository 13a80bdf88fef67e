use serde::Deserialize;

use crate::modules::players::domain::specifications::{
    FilterSpec, NumericField, Predicate, SetField, TextField,
};
use crate::modules::players::domain::value_objects::activity_status::ACTIVE_FLAGS;
use crate::modules::players::domain::value_objects::rating_presence::rated_predicate;
use crate::modules::players::domain::value_objects::{Gender, RatingDiscipline};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Raw advanced-search parameters as received from the caller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub federation: Option<String>,
    pub gender: Option<String>,
    pub title: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
    pub has_title: Option<String>,
}

/// Turns validated request parameters into store predicates.
///
/// Every validation error is raised here, before any store call.
pub struct FilterBuilder;

impl FilterBuilder {
    /// Advanced multi-filter search.
    ///
    /// A specific title and `hasTitle=true` target the same field, so the
    /// has-any-title predicate replaces the specific one when both are given.
    pub fn build(params: &SearchParameters) -> AppResult<FilterSpec> {
        let mut filter = Self::scope(params.federation.as_deref(), params.gender.as_deref())?;

        if let Some(title) = Validator::present(params.title.as_deref()) {
            filter = filter.set(Predicate::ContainsAny(
                SetField::Titles,
                vec![title.to_uppercase()],
            ));
        }

        if Validator::parse_flag("hasTitle", params.has_title.as_deref(), false)? {
            filter = filter.set(Predicate::NonEmpty(SetField::Titles));
        }

        let min = Validator::parse_optional_non_negative("minRating", params.min_rating.as_deref())?;
        let max = Validator::parse_optional_non_negative("maxRating", params.max_rating.as_deref())?;
        if min.is_some() || max.is_some() {
            filter = filter.set(Predicate::Range {
                field: NumericField::StandardRating,
                min: min.map(i64::from),
                max: max.map(i64::from),
            });
        }

        Ok(filter)
    }

    /// Optional federation and gender constraints shared by listings and rankings
    pub fn scope(federation: Option<&str>, gender: Option<&str>) -> AppResult<FilterSpec> {
        let mut filter = FilterSpec::new();

        if let Some(federation) = Validator::present(federation) {
            filter = filter.set(Self::federation("federation", federation)?);
        }

        if let Some(gender) = Validator::present(gender) {
            let gender = Gender::parse_parameter("gender", gender)?;
            filter = filter.set(Predicate::Equals(TextField::Gender, gender.code().to_string()));
        }

        Ok(filter)
    }

    pub fn federation(parameter: &str, raw: &str) -> AppResult<Predicate> {
        let code = Validator::normalize_federation(parameter, raw)?;
        Ok(Predicate::Equals(TextField::Federation, code))
    }

    /// Case-insensitive name search
    pub fn name_search(term: &str) -> FilterSpec {
        FilterSpec::new().set(Predicate::Substring(TextField::Name, term.trim().to_string()))
    }

    pub fn exact_id(id: &str) -> FilterSpec {
        FilterSpec::new().set(Predicate::Equals(TextField::Id, id.trim().to_string()))
    }

    /// Restrict to active records unless inactive ones were asked for
    pub fn with_activity(filter: FilterSpec, include_inactive: bool) -> FilterSpec {
        if include_inactive {
            filter
        } else {
            filter.set(Self::active_predicate())
        }
    }

    pub fn active_predicate() -> Predicate {
        Predicate::InSet(
            TextField::ActivityFlag,
            ACTIVE_FLAGS.iter().map(|flag| flag.to_string()).collect(),
        )
    }

    /// Exclude records unrated in the ranked discipline
    pub fn rated_in(filter: FilterSpec, discipline: RatingDiscipline) -> FilterSpec {
        filter.and(rated_predicate(discipline.rating_field(), true))
    }
}
