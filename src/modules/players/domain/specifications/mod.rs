pub mod facet;
pub mod filter;

pub use facet::{
    Accumulator, FacetKey, FacetResult, FacetRow, FacetSpec, FacetValue, GroupKey,
};
pub use filter::{
    FilterSpec, FilterTarget, NumericField, Predicate, SetField, SortDirection, SortSpec,
    TextField,
};
