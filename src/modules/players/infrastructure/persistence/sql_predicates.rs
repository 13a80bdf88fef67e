/// Translation of filter and sort specifications into diesel expressions
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::modules::players::domain::specifications::{
    FilterSpec, NumericField, Predicate, SetField, SortDirection, SortSpec, TextField,
};
use crate::schema::players;
use crate::shared::infrastructure::database::unicode_lower;

pub type BoxedCondition = Box<dyn BoxableExpression<players::table, Sqlite, SqlType = Bool>>;
pub type BoxedPlayerQuery = players::BoxedQuery<'static, Sqlite>;

const LIKE_ESCAPE: char = '\\';

macro_rules! text_column {
    ($field:expr, |$col:ident| $body:expr) => {
        match $field {
            TextField::Id => {
                let $col = players::id;
                $body
            }
            TextField::Name => {
                let $col = players::name;
                $body
            }
            TextField::Federation => {
                let $col = players::federation;
                $body
            }
            TextField::Gender => {
                let $col = players::gender;
                $body
            }
            TextField::ActivityFlag => {
                let $col = players::activity_flag;
                $body
            }
        }
    };
}

macro_rules! set_column {
    ($field:expr, |$col:ident| $body:expr) => {
        match $field {
            SetField::Titles => {
                let $col = players::titles;
                $body
            }
            SetField::WomenTitles => {
                let $col = players::women_titles;
                $body
            }
            SetField::OtherTitles => {
                let $col = players::other_titles;
                $body
            }
            SetField::AdditionalDesignations => {
                let $col = players::additional_designations;
                $body
            }
        }
    };
}

/// Non-nullable integer columns; birth year is handled separately
macro_rules! integer_column {
    ($field:expr, |$col:ident| $body:expr, birth_year => $nullable:expr) => {
        match $field {
            NumericField::StandardRating => {
                let $col = players::standard_rating;
                $body
            }
            NumericField::RapidRating => {
                let $col = players::rapid_rating;
                $body
            }
            NumericField::BlitzRating => {
                let $col = players::blitz_rating;
                $body
            }
            NumericField::BirthYear => $nullable,
        }
    };
}

fn literal(value: bool) -> BoxedCondition {
    Box::new(AsExpression::<Bool>::as_expression(value))
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Escape LIKE wildcards in user-supplied text
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn and_all(conditions: Vec<BoxedCondition>) -> BoxedCondition {
    conditions
        .into_iter()
        .reduce(|acc, next| Box::new(acc.and(next)))
        .unwrap_or_else(|| literal(true))
}

fn or_all(conditions: Vec<BoxedCondition>) -> BoxedCondition {
    conditions
        .into_iter()
        .reduce(|acc, next| Box::new(acc.or(next)))
        .unwrap_or_else(|| literal(false))
}

fn range(field: NumericField, min: Option<i64>, max: Option<i64>) -> BoxedCondition {
    let min = min.map(clamp_i32);
    let max = max.map(clamp_i32);

    integer_column!(field, |col| {
        let mut parts: Vec<BoxedCondition> = Vec::new();
        if let Some(min) = min {
            parts.push(Box::new(col.ge(min)));
        }
        if let Some(max) = max {
            parts.push(Box::new(col.le(max)));
        }
        and_all(parts)
    }, birth_year => {
        let column = players::birth_year.assume_not_null();
        let mut parts: Vec<BoxedCondition> = vec![Box::new(players::birth_year.is_not_null())];
        if let Some(min) = min {
            parts.push(Box::new(column.ge(min)));
        }
        if let Some(max) = max {
            parts.push(Box::new(column.le(max)));
        }
        and_all(parts)
    })
}

fn contains_code(field: SetField, code: &str) -> BoxedCondition {
    let pattern = format!("%,{},%", escape_like(code));
    set_column!(field, |col| Box::new(col.like(pattern).escape(LIKE_ESCAPE)))
}

pub fn predicate_condition(predicate: &Predicate) -> BoxedCondition {
    match predicate {
        Predicate::Equals(field, value) => {
            let value = value.clone();
            text_column!(*field, |col| Box::new(col.eq(value)))
        }
        Predicate::InSet(field, values) => {
            let values = values.clone();
            text_column!(*field, |col| Box::new(col.eq_any(values)))
        }
        Predicate::ContainsAny(field, codes) => or_all(
            codes
                .iter()
                .map(|code| contains_code(*field, code))
                .collect(),
        ),
        Predicate::Range { field, min, max } => range(*field, *min, *max),
        Predicate::Exists(field) => match field {
            NumericField::BirthYear => Box::new(players::birth_year.is_not_null()),
            _ => literal(true),
        },
        Predicate::NonEmpty(field) => set_column!(*field, |col| Box::new(col.ne(""))),
        Predicate::Substring(field, needle) => {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            text_column!(*field, |col| Box::new(
                unicode_lower(col).like(pattern).escape(LIKE_ESCAPE)
            ))
        }
        Predicate::AnyOf(predicates) => {
            or_all(predicates.iter().map(predicate_condition).collect())
        }
    }
}

pub fn filter_condition(filter: &FilterSpec) -> BoxedCondition {
    and_all(filter.predicates().iter().map(predicate_condition).collect())
}

/// Apply the sort key followed by ascending id
pub fn apply_sort(query: BoxedPlayerQuery, sort: Option<SortSpec>) -> BoxedPlayerQuery {
    let Some(sort) = sort else {
        return query.order(players::id.asc());
    };

    let query = match (sort.field, sort.direction) {
        (NumericField::BirthYear, SortDirection::Ascending) => query.order(players::birth_year.asc()),
        (NumericField::BirthYear, SortDirection::Descending) => {
            query.order(players::birth_year.desc())
        }
        (field, direction) => integer_column!(field, |col| match direction {
            SortDirection::Ascending => query.order(col.asc()),
            SortDirection::Descending => query.order(col.desc()),
        }, birth_year => query),
    };

    query.then_order_by(players::id.asc())
}
